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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload tasks such as
//! backend requests and database queries from the main UI thread. A small
//! pool of worker threads translates [`AppTask`] requests into backend calls
//! and broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.
//!
//! Workers take tasks from one shared queue, so replies can arrive in any
//! order. Every reply carries the key it answers.

mod handlers;
use handlers::*;

use std::{
    sync::{
        Arc, Mutex,
        mpsc::{Receiver, Sender},
    },
    thread,
};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::{
    api::{self, CourseBackend},
    config::AppConfig,
    db,
    events::AppEvent,
    model::{Review, SearchCategory, search::SearchKey},
    search::history::HistoryEntry,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppTask {
    LoadHistory,
    RecordHistory(HistoryEntry),
    ClearHistory(SearchCategory),

    Search(SearchKey),

    GetDiscover,
    GetTrending,
    GetAllCourses,

    GetCourse(String),
    GetReviews(String),
    GetCourseStatus { user_id: String, code: String },

    SetLike { user_id: String, code: String, liked: bool },
    SetWatchlisted { user_id: String, code: String, watchlisted: bool },
    GetWatchlist(String),
    SubmitReview(Review),
}

/// Spawns the background threads that process application tasks.
///
/// Each worker opens its own backend and its own database connection, then
/// takes tasks from the shared queue until the sending side is dropped.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
///
/// # Errors
///
/// Returns an error if a worker thread cannot be spawned.
pub(crate) fn spawn_task_workers(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let task_rx = Arc::new(Mutex::new(task_rx));

    for id in 0..config.worker_threads.max(1) {
        let config = config.clone();
        let task_rx = Arc::clone(&task_rx);
        let event_tx = event_tx.clone();

        thread::Builder::new()
            .name(format!("task-worker-{id}"))
            .spawn(move || run_worker(&config, &task_rx, &event_tx))
            .context("Failed to spawn task worker")?;
    }

    Ok(())
}

fn run_worker(config: &AppConfig, task_rx: &Mutex<Receiver<AppTask>>, event_tx: &Sender<AppEvent>) {
    let (backend, mut conn) = match open_resources(config) {
        Ok(resources) => resources,
        Err(e) => {
            tracing::error!("worker failed to start: {e:#}");
            let _ = event_tx.send(AppEvent::FatalError(format!("{e:#}")));
            return;
        }
    };

    loop {
        // The lock is only held while waiting, never while a task runs
        let task = match task_rx.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };

        let Ok(task) = task else {
            break;
        };

        let mut ctx = TaskContext {
            config,
            event_tx,
            backend: backend.as_ref(),
            conn: &mut conn,
        };

        tracing::debug!(?task, "task started");

        if let Err(e) = handle_task(task, &mut ctx) {
            tracing::error!("task failed: {e:#}");
            let _ = event_tx.send(AppEvent::Error(e.to_string()));
        }
    }

    tracing::debug!("task worker finished");
}

fn open_resources(config: &AppConfig) -> Result<(Box<dyn CourseBackend>, Connection)> {
    let backend = api::open_backend(config)?;
    let conn = db::init_db(&config.database_path()?).context("Failed to initialise database")?;
    Ok((backend, conn))
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    pub(crate) config: &'a AppConfig,
    pub(crate) event_tx: &'a Sender<AppEvent>,
    pub(crate) backend: &'a dyn CourseBackend,
    pub(crate) conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
///
/// This function implements the logic for each task and sends the result back
/// through the application event channel.
pub(crate) fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadHistory => load_history(ctx),
        AppTask::RecordHistory(entry) => record_history(ctx, entry),
        AppTask::ClearHistory(category) => clear_history(ctx, category),

        AppTask::Search(key) => search(ctx, key),

        AppTask::GetDiscover => get_discover(ctx),
        AppTask::GetTrending => get_trending(ctx),
        AppTask::GetAllCourses => get_all_courses(ctx),

        AppTask::GetCourse(code) => get_course(ctx, code),
        AppTask::GetReviews(code) => get_reviews(ctx, code),
        AppTask::GetCourseStatus { user_id, code } => get_course_status(ctx, &user_id, code),

        AppTask::SetLike {
            user_id,
            code,
            liked,
        } => set_like(ctx, &user_id, code, liked),
        AppTask::SetWatchlisted {
            user_id,
            code,
            watchlisted,
        } => set_watchlisted(ctx, &user_id, code, watchlisted),
        AppTask::GetWatchlist(user_id) => get_watchlist(ctx, &user_id),
        AppTask::SubmitReview(review) => submit_review(ctx, review),
    }
}
