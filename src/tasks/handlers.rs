// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;

use crate::{
    api::ApiError,
    db,
    events::{AppEvent, Mutation},
    model::{Review, SearchCategory, search::SearchKey},
    search::history::HistoryEntry,
    tasks::TaskContext,
};

pub(super) fn load_history(ctx: &mut TaskContext) -> Result<()> {
    let entries = db::history::load_history(ctx.conn)?;
    ctx.event_tx.send(AppEvent::HistoryLoaded(entries))?;

    Ok(())
}

pub(super) fn record_history(ctx: &mut TaskContext, entry: HistoryEntry) -> Result<()> {
    db::history::append_history(ctx.conn, &entry, ctx.config.history_limit)?;

    Ok(())
}

pub(super) fn clear_history(ctx: &mut TaskContext, category: SearchCategory) -> Result<()> {
    db::history::clear_history(ctx.conn, category)?;

    Ok(())
}

pub(super) fn search(ctx: &mut TaskContext, key: SearchKey) -> Result<()> {
    let result = ctx.backend.search(&key).map_err(|e| {
        tracing::warn!(q = %key.q, page = key.page, "search failed: {e}");
        e.to_string()
    });
    ctx.event_tx.send(AppEvent::SearchResults(key, result))?;

    Ok(())
}

pub(super) fn get_discover(ctx: &mut TaskContext) -> Result<()> {
    let lists = ctx.backend.discover().map_err(|e| e.to_string());
    ctx.event_tx.send(AppEvent::DiscoverLoaded(lists))?;

    Ok(())
}

pub(super) fn get_trending(ctx: &mut TaskContext) -> Result<()> {
    let trending = ctx.backend.trending().map_err(|e| e.to_string());
    ctx.event_tx.send(AppEvent::TrendingLoaded(trending))?;

    Ok(())
}

pub(super) fn get_all_courses(ctx: &mut TaskContext) -> Result<()> {
    let courses = ctx.backend.all_courses().map_err(|e| e.to_string());
    ctx.event_tx.send(AppEvent::AllCoursesLoaded(courses))?;

    Ok(())
}

pub(super) fn get_course(ctx: &mut TaskContext, code: String) -> Result<()> {
    let course = match ctx.backend.course_detail(&code) {
        Ok(course) => Ok(Some(course)),
        Err(ApiError::NotFound(_) | ApiError::Status { status: 404, .. }) => Ok(None),
        Err(e) => {
            tracing::warn!(%code, "course detail failed: {e}");
            Err(e.to_string())
        }
    };
    ctx.event_tx.send(AppEvent::CourseLoaded(code, course))?;

    Ok(())
}

pub(super) fn get_reviews(ctx: &mut TaskContext, code: String) -> Result<()> {
    let reviews = ctx.backend.reviews(&code).map_err(|e| e.to_string());
    ctx.event_tx.send(AppEvent::ReviewsLoaded(code, reviews))?;

    Ok(())
}

pub(super) fn get_course_status(ctx: &mut TaskContext, user_id: &str, code: String) -> Result<()> {
    let liked = ctx.backend.is_liked(user_id, &code)?;
    let watchlisted = ctx.backend.is_watchlisted(user_id, &code)?;
    ctx.event_tx.send(AppEvent::CourseStatus {
        code,
        liked,
        watchlisted,
    })?;

    Ok(())
}

pub(super) fn set_like(ctx: &mut TaskContext, user_id: &str, code: String, liked: bool) -> Result<()> {
    if let Err(e) = ctx.backend.set_like(user_id, &code, liked) {
        tracing::error!(%code, liked, "like failed: {e}");
        ctx.event_tx
            .send(AppEvent::MutationFailed(Mutation::Like { code, liked }))?;
    }

    Ok(())
}

pub(super) fn set_watchlisted(
    ctx: &mut TaskContext,
    user_id: &str,
    code: String,
    watchlisted: bool,
) -> Result<()> {
    match ctx.backend.set_watchlisted(user_id, &code, watchlisted) {
        Ok(()) => get_watchlist(ctx, user_id),
        Err(e) => {
            tracing::error!(%code, watchlisted, "watchlist update failed: {e}");
            ctx.event_tx
                .send(AppEvent::MutationFailed(Mutation::Watchlist { code, watchlisted }))?;
            Ok(())
        }
    }
}

pub(super) fn get_watchlist(ctx: &mut TaskContext, user_id: &str) -> Result<()> {
    let courses = ctx.backend.watchlist(user_id).map_err(|e| e.to_string());
    ctx.event_tx.send(AppEvent::WatchlistLoaded(courses))?;

    Ok(())
}

pub(super) fn submit_review(ctx: &mut TaskContext, review: Review) -> Result<()> {
    match ctx.backend.submit_review(&review) {
        Ok(()) => {
            tracing::info!(code = %review.course_code, "review submitted");
            ctx.event_tx
                .send(AppEvent::ReviewSubmitted(review.course_code.clone()))?;
            get_reviews(ctx, review.course_code)
        }
        Err(e) => {
            tracing::error!(code = %review.course_code, "review failed: {e}");
            ctx.event_tx
                .send(AppEvent::MutationFailed(Mutation::Review(review)))?;
            Ok(())
        }
    }
}
