use clap::Parser;
use image_optimizer::cli::Cli;
use image_optimizer::cli::command::Command;
use image_optimizer::conversion::ConversionRequest;
use image_optimizer::geometry::MediaDimensions;
use image_optimizer::geometry::VideoResolution;
use image_optimizer::video::Compression;

fn video_request(args: &[&str]) -> image_optimizer::video::VideoRequest {
    let cli = Cli::try_parse_from(args).unwrap();
    let Some(Command::Video(video_args)) = cli.command else {
        panic!("expected a video command");
    };
    let ConversionRequest::Video(request) = video_args.into_request() else {
        panic!("expected a video request");
    };
    request
}

#[test]
fn video_defaults() {
    let request = video_request(&["image-optimizer", "video", "clip.mov", "9:16"]);
    assert_eq!(request.resolution, VideoResolution::P720);
    assert_eq!(request.compression, Compression::Medium);
    assert_eq!(request.frame().unwrap(), MediaDimensions::new(406, 720));
}

#[test]
fn video_options_parse() {
    let request = video_request(&[
        "image-optimizer",
        "video",
        "clip.mov",
        "16:9",
        "--resolution",
        "480p",
        "--compression",
        "low",
    ]);
    assert_eq!(request.resolution, VideoResolution::P480);
    assert_eq!(request.compression, Compression::Low);
    assert_eq!(request.frame().unwrap(), MediaDimensions::new(854, 480));
}

#[test]
fn unknown_resolution_is_rejected() {
    assert!(
        Cli::try_parse_from([
            "image-optimizer",
            "video",
            "clip.mov",
            "16:9",
            "--resolution",
            "1080p"
        ])
        .is_err()
    );
}
