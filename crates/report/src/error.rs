use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no monthly report partitions found")]
    NoMonthPartitions,
    #[error("no report partitions found under the latest month")]
    NoReportPartitions,
    #[error("no archive files found in the latest report partition")]
    NoArchiveFound,
    #[error("archive is not a readable zip: {0}")]
    ArchiveUnreadable(#[from] zip::result::ZipError),
    #[error("archive contains no members")]
    ArchiveEmpty,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("store error: {0}")]
    Store(#[from] cur_store::StoreError),
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        let (status, code) = match err {
            ReportError::NoMonthPartitions => (404, Some("no_month_partitions".to_string())),
            ReportError::NoReportPartitions => (404, Some("no_report_partitions".to_string())),
            ReportError::NoArchiveFound => (404, Some("no_archive_found".to_string())),
            ReportError::ArchiveUnreadable(_) | ReportError::ArchiveEmpty => {
                (502, Some("bad_archive".to_string()))
            }
            ReportError::Csv(_) | ReportError::Store(_) => (500, None),
        };
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}
