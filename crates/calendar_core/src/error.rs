use chrono::NaiveDate;
use shared::{
    domain::{MovieId, YearMonth},
    error::{ApiError, ErrorCode},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("failed to fetch releases: {0}")]
    DataFetch(String),
    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("date {date} is outside the displayed month {month}")]
    SelectionOutsideMonth { date: NaiveDate, month: YearMonth },
    #[error("notification change for movie {0} is still pending")]
    TogglePending(MovieId),
    #[error("failed to update notification subscription: {0}")]
    Subscription(String),
}

impl CalendarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DataFetch(_) => ErrorCode::DataFetchFailure,
            Self::InvalidMonth { .. } | Self::SelectionOutsideMonth { .. } => {
                ErrorCode::InvalidState
            }
            Self::TogglePending(_) => ErrorCode::Conflict,
            Self::Subscription(_) => ErrorCode::Internal,
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(value: CalendarError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
