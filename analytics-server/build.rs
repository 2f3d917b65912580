use std::process::Command;

fn main() {
    // Get the short git commit hash
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok();

    let git_hash = output
        .and_then(|o| {
            if o.status.success() {
                String::from_utf8(o.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);

    // Re-run if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    // gRPC service stubs, messages are plain prost structs in src/rpc/messages.rs
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(input)
            .output_type(output)
            .codec_path("tonic::codec::ProstCodec")
            .build()
    };

    let service = tonic_build::manual::Service::builder()
        .name("Analytics")
        .package("jukebox.analytics")
        .method(method(
            "log_playback",
            "LogPlayback",
            "crate::rpc::LogPlaybackRequest",
            "crate::rpc::Empty",
        ))
        .method(method(
            "update_price",
            "UpdatePrice",
            "crate::rpc::UpdatePriceRequest",
            "crate::rpc::Empty",
        ))
        .method(method(
            "get_top_tracks",
            "GetTopTracks",
            "crate::rpc::Empty",
            "crate::rpc::TopTracksResponse",
        ))
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
