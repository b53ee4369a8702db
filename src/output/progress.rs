//! Progress reporting functionality
//!
//! Progress goes to stderr so that reports written to stdout stay clean.

use crate::core::parallel::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    _multi_progress: Option<MultiProgress>,
    main_progress_bar: Option<ProgressBar>,
    message_bar: Option<ProgressBar>,
    current_operation: Arc<Mutex<String>>,
}

impl ProgressReporter {
    /// Create a new progress reporter; `quiet` suppresses all bars
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let (multi, main_progress_bar, message_bar) = if quiet {
            (None, None, None)
        } else {
            let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

            let main_bar = multi_progress.add(ProgressBar::new(0));
            main_bar.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );

            let msg_bar = multi_progress.add(ProgressBar::new(1));
            msg_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            (Some(multi_progress), Some(main_bar), Some(msg_bar))
        };

        Self {
            quiet,
            verbose,
            _multi_progress: multi,
            main_progress_bar,
            message_bar,
            current_operation: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
        }

        if let Some(msg_bar) = &self.message_bar {
            msg_bar.set_message(operation.to_string());
        }

        if let Ok(mut current_op) = self.current_operation.lock() {
            *current_op = operation.to_string();
        }

        if self.verbose {
            tracing::debug!("starting: {}", operation);
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
        }

        if let Ok(mut current_op) = self.current_operation.lock() {
            if message != *current_op {
                if let Some(msg_bar) = &self.message_bar {
                    msg_bar.set_message(message.to_string());
                }
                *current_op = message.to_string();
            }
        }

        if self.verbose {
            tracing::trace!("[{}/{}] {}", current, total, message);
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation and clear the bars
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_and_clear();
        }

        if let Some(msg_bar) = &self.message_bar {
            msg_bar.finish_and_clear();
        }

        if self.verbose {
            tracing::debug!("finished: {}", message);
        }
    }

    /// Print a warning message (always printed, even in quiet mode)
    pub fn print_warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Print an error message (always printed, even in quiet mode)
    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(
    reporter: Arc<ProgressReporter>,
) -> impl Fn(usize, usize, &str) + Send + Sync {
    move |current: usize, total: usize, message: &str| {
        reporter.update(current, total, message);
    }
}
