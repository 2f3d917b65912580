//! Wire messages of the `jukebox.analytics.Analytics` service.
//!
//! Plain prost structs, standard protobuf encoding without a `.proto` file.

#[derive(Clone, PartialEq, prost::Message)]
pub struct LogPlaybackRequest {
    #[prost(int64, tag = "1")]
    pub track_id: i64,
    #[prost(double, tag = "2")]
    pub amount_paid: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdatePriceRequest {
    #[prost(int64, tag = "1")]
    pub track_id: i64,
    #[prost(double, tag = "2")]
    pub new_price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TopTrack {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(uint64, tag = "2")]
    pub count: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TopTracksResponse {
    #[prost(message, repeated, tag = "1")]
    pub tracks: Vec<TopTrack>,
}
