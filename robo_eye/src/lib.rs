// THEORY:
// This file is the main entry point for the `robo_eye` library crate.
// It exposes the `NavigationPipeline` and its data structures (`PipelineConfig`,
// `Report`, etc.) as the high-level interface, while the small decision units
// live in `core_modules` where they can be used and tested on their own.
//
// The crate deliberately has no OpenCV dependency. Capture, thresholding and
// contour extraction happen in the caller (see `visual_tester`), which hands
// the pipeline one `Detection` per frame and renders the returned `Report`.

pub mod core_modules;
pub mod error;
pub mod pipeline;
