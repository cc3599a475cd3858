pub mod error;
pub mod rest_api;
pub mod service;
pub mod state;
pub mod validate;

/// Lets handlers take a service (or repository) directly as an extractor,
/// built per request from the shared [`state::AppState`].
#[macro_export]
macro_rules! from_app_state {
    ($target:ty, $build:expr) => {
        impl axum::extract::FromRequestParts<$crate::state::AppState> for $target {
            type Rejection = http::StatusCode;

            fn from_request_parts(
                _parts: &mut http::request::Parts,
                state: &$crate::state::AppState,
            ) -> impl std::future::Future<Output = std::result::Result<Self, Self::Rejection>>
                   + core::marker::Send {
                let build: fn(&$crate::state::AppState) -> $target = $build;
                futures::future::ready(std::result::Result::Ok(build(state)))
            }
        }
    };
}
