use crate::id::{SwapId, UserId};
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Swap intent not found")]
    #[diagnostic(
        code(cityswap_core::swap_not_found),
        help("The intent may have been cancelled by its owner; refetch before retrying")
    )]
    SwapNotFound { id: SwapId },

    #[error("User not found")]
    #[diagnostic(
        code(cityswap_core::user_not_found),
        help("Check that the user ID is correct and the profile has been created")
    )]
    UserNotFound { id: UserId },

    #[error("Not the owner of this swap intent")]
    #[diagnostic(
        code(cityswap_core::not_swap_owner),
        help("Only the user who created an intent may read, match against, or cancel it")
    )]
    NotSwapOwner { swap: SwapId, requester: UserId },

    #[error("Please add your location first before viewing others")]
    #[diagnostic(
        code(cityswap_core::location_required),
        help("Set a location on your profile; proximity matching needs real coordinates")
    )]
    LocationRequired { user: UserId },

    #[error("Swap amount must be greater than zero")]
    #[diagnostic(
        code(cityswap_core::invalid_amount),
        help("Provide a positive amount for the swap intent")
    )]
    InvalidAmount { amount: u64 },

    #[error("Coordinates out of range")]
    #[diagnostic(
        code(cityswap_core::invalid_coordinates),
        help("Longitude must be within [-180, 180] and latitude within [-90, 90]")
    )]
    InvalidCoordinates { longitude: f64, latitude: f64 },

    #[error("Cannot match a swap intent with itself")]
    #[diagnostic(
        code(cityswap_core::same_pairing),
        help("A match requires two distinct swap intents")
    )]
    SamePairing { id: SwapId },

    #[error("Store operation failed: {operation}")]
    #[diagnostic(
        code(cityswap_core::store_failed),
        help("Check storage backend connectivity; the caller may retry")
    )]
    Store {
        operation: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CoreError {
    pub fn swap_not_found(id: SwapId) -> Self {
        Self::SwapNotFound { id }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn not_swap_owner(swap: SwapId, requester: UserId) -> Self {
        Self::NotSwapOwner { swap, requester }
    }

    pub fn location_required(user: UserId) -> Self {
        Self::LocationRequired { user }
    }

    pub fn store_error(
        operation: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            operation: operation.into(),
            cause: Box::new(cause),
        }
    }
}
