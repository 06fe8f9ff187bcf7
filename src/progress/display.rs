//! Progress bar display for a run.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Coordinates the row bar and the per-file byte bar.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create the display for a window of `total_rows` rows.
    ///
    /// The bars are drawn on `bars` when given, so that whoever holds a
    /// clone of it (the log writer) can print above them. Disabled styles
    /// never draw.
    pub fn new(style_options: StyleOptions, total_rows: usize, bars: Option<MultiProgress>) -> Self {
        let multi = match (style_options.is_enabled(), bars) {
            (true, Some(bars)) => bars,
            (true, None) => MultiProgress::new(),
            (false, _) => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let main = multi.add(
            style_options
                .main()
                .clone()
                .to_progress_bar(total_rows as u64),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Create the byte bar for one file. Its length is set once the
    /// response headers are known.
    pub fn create_child_progress(&self, file_name: &str) -> ProgressBar {
        self.main.set_message(file_name.to_string());
        self.multi
            .add(self.style_options.child().clone().to_progress_bar(0))
    }

    /// Finish a byte bar, clearing it if configured.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
        self.multi.remove(&pb);
    }

    /// Count one more handled row.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Rows handled so far.
    pub fn handled(&self) -> u64 {
        self.main.position()
    }

    /// Finish the display, clearing or keeping the row bar based on
    /// configuration.
    pub fn finish(self) {
        self.main.set_message("");
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
