use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const MAX_LIMIT: u32 = 100;

/// Limit/offset query parameters of list endpoints.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitOffsetParams {
    /// Page size; defaults to the configured page size
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

impl LimitOffsetParams {
    pub fn window(&self, default_limit: u32) -> Window {
        Window {
            limit: self.limit.unwrap_or(default_limit),
            offset: self.offset.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Cuts `window` out of the full result sequence, in the order it was given.
pub fn paginate<T>(items: Vec<T>, window: Window) -> Page<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect();

    Page {
        items,
        total,
        limit: window.limit,
        offset: window.offset,
    }
}
