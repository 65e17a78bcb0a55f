//! Publishing status vocabularies.
//!
//! [`SharingStatus`] tracks the console's own sharing/embargo workflow.
//! [`WireStatus`] mirrors the upstream wire service's editorial stage. The
//! two are independent and a shared article carries both.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharingStatus {
    Draft,
    Imported,
    Preview,
    Embargo,
    Released,
}

impl SharingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SharingStatus::Draft => "draft",
            SharingStatus::Imported => "imported",
            SharingStatus::Preview => "preview",
            SharingStatus::Embargo => "embargo",
            SharingStatus::Released => "released",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SharingStatus::Draft => "Draft",
            SharingStatus::Imported => "Imported",
            SharingStatus::Preview => "Preview",
            SharingStatus::Embargo => "Embargoed",
            SharingStatus::Released => "Released",
        }
    }
}

/// Inputs of the sharing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharingFlags {
    pub has_id: bool,
    pub is_previewed: bool,
    pub is_shared: bool,
    pub embargo_until: Option<DateTime<Utc>>,
}

impl SharingFlags {
    /// Evaluates the status at `now`; the first matching rule wins.
    pub fn status_at(&self, now: DateTime<Utc>) -> SharingStatus {
        let embargo_elapsed = self.embargo_until.is_none_or(|until| until <= now);
        if self.is_shared && embargo_elapsed {
            SharingStatus::Released
        } else if self.is_shared {
            SharingStatus::Embargo
        } else if self.is_previewed {
            SharingStatus::Preview
        } else if self.has_id {
            SharingStatus::Imported
        } else {
            SharingStatus::Draft
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireStatus {
    Working,
    Assigning,
    SecondEdit,
    Rim,
    Slot,
    Done,
    Published,
    Unknown,
}

impl WireStatus {
    /// Maps the upstream workflow code; the published flag wins over any code.
    pub fn from_code(code: Option<i64>, published: bool) -> Self {
        if published {
            return WireStatus::Published;
        }
        match code {
            Some(1) => WireStatus::Working,
            Some(2) => WireStatus::Assigning,
            Some(3) => WireStatus::SecondEdit,
            Some(4) => WireStatus::Rim,
            Some(5) => WireStatus::Slot,
            Some(6) => WireStatus::Done,
            _ => WireStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WireStatus::Working => "working",
            WireStatus::Assigning => "assigning",
            WireStatus::SecondEdit => "second-edit",
            WireStatus::Rim => "rim",
            WireStatus::Slot => "slot",
            WireStatus::Done => "done",
            WireStatus::Published => "published",
            WireStatus::Unknown => "unknown",
        }
    }

    pub fn verbose(self) -> &'static str {
        match self {
            WireStatus::Working => "Working",
            WireStatus::Assigning => "Assigning",
            WireStatus::SecondEdit => "Second Edit",
            WireStatus::Rim => "Rim",
            WireStatus::Slot => "Slot",
            WireStatus::Done => "Done",
            WireStatus::Published => "Published",
            WireStatus::Unknown => "Unknown",
        }
    }
}

/// Publication state of a CMS page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    Published,
    Scheduled,
    Unpublished,
}

impl PageStatus {
    pub fn from_dates(
        last_published: Option<&DateTime<Utc>>,
        schedule_for: Option<&DateTime<Utc>>,
    ) -> Self {
        match (last_published, schedule_for) {
            (Some(_), _) => PageStatus::Published,
            (None, Some(_)) => PageStatus::Scheduled,
            (None, None) => PageStatus::Unpublished,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Published => "pub",
            PageStatus::Scheduled => "sked",
            PageStatus::Unpublished => "none",
        }
    }

    pub fn verbose(self) -> &'static str {
        match self {
            PageStatus::Published => "published",
            PageStatus::Scheduled => "scheduled to be published",
            PageStatus::Unpublished => "unpublished",
        }
    }
}
