use super::*;

pub(crate) enum Event {
  PlanLoaded {
    result: Result<Vec<String>, ApiError>,
  },
  PlanSaved {
    count: usize,
    purpose: SavePurpose,
    request_id: u64,
    result: Result<(), ApiError>,
  },
  Recommendations {
    request_id: u64,
    result: Result<Vec<Recommendation>, ApiError>,
  },
  SearchResults {
    generation: u64,
    result: Result<Vec<Course>, ApiError>,
  },
}
