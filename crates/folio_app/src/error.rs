//! Application errors

use crate::clipboard::ClipboardError;
use crate::contact::ContactError;
use crate::content::ContentError;
use crate::relay::RelayError;
use folio_layout::LayoutError;
use folio_theme::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, FolioError>;
