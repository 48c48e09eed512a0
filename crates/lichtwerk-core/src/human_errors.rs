// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for photographers and listing agents.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::LichtwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup; trying again may work.
    Transient,
    /// User must do something (pick another file, fix a typo).
    ActionRequired,
    /// Cannot be fixed by retrying; the input itself is unusable.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether running the same command again could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `LichtwerkError` into a `HumanError`.
pub fn humanize_error(err: &LichtwerkError) -> HumanError {
    match err {
        LichtwerkError::Decode(_) => HumanError {
            message: "This file couldn't be read as a photo.".into(),
            suggestion: "It may be damaged or in an unusual format. Try exporting it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        LichtwerkError::UnknownRecipe(name) => HumanError {
            message: format!("There's no look called \"{name}\"."),
            suggestion: "Run `lichtwerk list` to see every available look, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LichtwerkError::UnknownSkyStyle(name) => HumanError {
            message: format!("There's no sky style called \"{name}\"."),
            suggestion: "Use one of: blue, sunset, dramatic.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LichtwerkError::Encode(_) => HumanError {
            message: "The finished photo couldn't be saved in that format.".into(),
            suggestion: "Try saving with a .jpg or .png extension instead.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LichtwerkError::Config(detail) => HumanError {
            message: "The settings file has a value that can't be used.".into(),
            suggestion: format!("Fix the settings file, or run without it to use the defaults. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LichtwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "Check the path for typos, or that the file hasn't been moved.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "There's no permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or choose a different output folder.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        LichtwerkError::Serialization(_) => HumanError {
            message: "The settings file isn't valid JSON.".into(),
            suggestion: "Check the file for missing commas or quotes.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
