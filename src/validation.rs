//! Client-side field rules for a submission.
//!
//! Every rule is a pure predicate over the candidate; nothing here does I/O.

use std::fmt;

use crate::model::{CandidateSubmission, FileBlob};

/// Files at or above this size are rejected.
pub const MAX_FILE_SIZE_BYTES: u64 = 10_000_000;

pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 20;
pub const DESCRIPTION_MAX_CHARS: usize = 65;

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Image,
    Title,
    Description,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Image, Field::Title, Field::Description];

    pub fn name(self) -> &'static str {
        match self {
            Field::Image => "image",
            Field::Title => "title",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    FileRequired,
    FileTooLarge,
    UnsupportedFormat,
    Required,
    TooShort,
    TooLong,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::FileRequired => "file required",
            RejectReason::FileTooLarge => "file too large",
            RejectReason::UnsupportedFormat => "unsupported format",
            RejectReason::Required => "required",
            RejectReason::TooShort => "too short",
            RejectReason::TooLong => "too long",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict for a single field.
///
/// `reasons` is empty iff the field was accepted. The image field can
/// fail several rules at once and reports all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub field: Field,
    pub reasons: Vec<RejectReason>,
}

impl ValidationOutcome {
    fn new(field: Field, reasons: Vec<RejectReason>) -> Self {
        Self { field, reasons }
    }

    pub fn accepted(&self) -> bool {
        self.reasons.is_empty()
    }

    /// First failing reason, present iff the field was rejected.
    pub fn reason_code(&self) -> Option<&'static str> {
        self.reasons.first().map(|r| r.code())
    }

    pub fn rejects(&self, reason: RejectReason) -> bool {
        self.reasons.contains(&reason)
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepted() {
            return write!(f, "{}: ok", self.field);
        }
        let codes: Vec<&str> = self.reasons.iter().map(|r| r.code()).collect();
        write!(f, "{}: {}", self.field, codes.join(", "))
    }
}

/// Validate one field of `candidate`.
pub fn validate(field: Field, candidate: &CandidateSubmission) -> ValidationOutcome {
    match field {
        Field::Image => validate_image(candidate.file.as_ref()),
        Field::Title => validate_title(&candidate.title),
        Field::Description => validate_description(&candidate.description),
    }
}

/// Validate every field, in `Field::ALL` order.
pub fn validate_all(candidate: &CandidateSubmission) -> Vec<ValidationOutcome> {
    Field::ALL
        .iter()
        .map(|&field| validate(field, candidate))
        .collect()
}

pub fn all_accepted(outcomes: &[ValidationOutcome]) -> bool {
    outcomes.iter().all(ValidationOutcome::accepted)
}

pub fn validate_image(file: Option<&FileBlob>) -> ValidationOutcome {
    let Some(file) = file else {
        return ValidationOutcome::new(Field::Image, vec![RejectReason::FileRequired]);
    };

    // Size and format are both checked so the caller sees every failure.
    let mut reasons = Vec::new();
    if file.size_bytes >= MAX_FILE_SIZE_BYTES {
        reasons.push(RejectReason::FileTooLarge);
    }
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        reasons.push(RejectReason::UnsupportedFormat);
    }
    ValidationOutcome::new(Field::Image, reasons)
}

pub fn validate_title(title: &str) -> ValidationOutcome {
    let len = title.chars().count();
    let reasons = if len == 0 {
        vec![RejectReason::Required]
    } else if len < TITLE_MIN_CHARS {
        vec![RejectReason::TooShort]
    } else if len > TITLE_MAX_CHARS {
        vec![RejectReason::TooLong]
    } else {
        Vec::new()
    };
    ValidationOutcome::new(Field::Title, reasons)
}

pub fn validate_description(description: &str) -> ValidationOutcome {
    let len = description.chars().count();
    let reasons = if len == 0 {
        vec![RejectReason::Required]
    } else if len > DESCRIPTION_MAX_CHARS {
        vec![RejectReason::TooLong]
    } else {
        Vec::new()
    };
    ValidationOutcome::new(Field::Description, reasons)
}
