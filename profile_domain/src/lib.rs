pub mod error;
pub mod profile;
pub mod upload;

use entrait::entrait_export as entrait;

///
/// Mockable system clock
///
#[entrait(pub GetCurrentTime, no_deps, mock_api=GetCurrentTimeMock)]
fn get_current_time() -> time::OffsetDateTime {
    time::OffsetDateTime::now_utc()
}

