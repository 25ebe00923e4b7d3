use serde::Serialize;

/// Body of every successful JSON response: the payload sits under `data`.
///
/// Rankings, single works and vote listings all share it, and the winner
/// endpoint sends `{"data": null}` when there is nothing to rank.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
