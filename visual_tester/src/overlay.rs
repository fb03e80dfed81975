use opencv::{
    core::{Mat, Point, Rect, Scalar},
    imgproc,
    prelude::*,
};
use robo_eye::core_modules::point;
use robo_eye::pipeline::{GuidanceData, Report};

const TARGET_RADIUS: i32 = 12;

fn cv_point(p: point::Point) -> Point {
    Point::new(p.x, p.y)
}

/// OpenCV draws in BGR order.
fn bgr(rgb: [u8; 3]) -> Scalar {
    Scalar::new(rgb[2] as f64, rgb[1] as f64, rgb[0] as f64, 0.0)
}

fn text(frame: &mut Mat, label: &str, origin: Point, scale: f64, color: Scalar) -> opencv::Result<()> {
    imgproc::put_text(
        frame,
        label,
        origin,
        imgproc::FONT_HERSHEY_SIMPLEX,
        scale,
        color,
        3,
        imgproc::LINE_8,
        false,
    )
}

/// Draws the target marker, the object markers and the guidance labels.
pub fn draw(frame: &mut Mat, report: &Report, swatch: Option<[u8; 3]>) -> opencv::Result<()> {
    let target = match report {
        Report::NoObjectDetected { target } => *target,
        Report::Guidance(data) => data.target,
    };
    draw_target(frame, cv_point(target))?;

    if let Report::Guidance(data) = report {
        draw_object(frame, data)?;
        let color = bgr(swatch.unwrap_or([255, 255, 0]));
        text(frame, &format!("Detected: {}", data.detection.color), Point::new(40, 100), 1.0, color)?;
    }

    text(
        frame,
        &format!("Direction: {}", report.direction_label()),
        Point::new(40, 50),
        1.0,
        bgr([255, 0, 0]),
    )?;
    text(
        frame,
        &format!("Heading: {}", report.heading_label()),
        Point::new(40, 180),
        0.8,
        bgr([255, 0, 255]),
    )?;

    let bottom = frame.rows() - 40;
    text(
        frame,
        &format!("Navigate: {}", report.navigation_label()),
        Point::new(40, bottom),
        0.9,
        bgr([255, 165, 0]),
    )
}

fn draw_target(frame: &mut Mat, center: Point) -> opencv::Result<()> {
    // White rim keeps the black marker visible on dark backgrounds.
    imgproc::circle(frame, center, TARGET_RADIUS + 4, Scalar::all(255.0), -1, imgproc::LINE_8, 0)?;
    imgproc::circle(frame, center, TARGET_RADIUS, Scalar::all(0.0), -1, imgproc::LINE_8, 0)
}

fn draw_object(frame: &mut Mat, data: &GuidanceData) -> opencv::Result<()> {
    let b = data.detection.bounding_box;
    let centroid = cv_point(data.centroid);
    let height = frame.rows();

    imgproc::rectangle(
        frame,
        Rect::from_points(cv_point(b.top_left()), cv_point(b.bottom_right())),
        bgr([0, 255, 0]),
        3,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::circle(frame, centroid, 7, bgr([0, 0, 255]), -1, imgproc::LINE_8, 0)?;
    imgproc::line(
        frame,
        Point::new(centroid.x, 0),
        Point::new(centroid.x, height),
        bgr([0, 0, 255]),
        2,
        imgproc::LINE_8,
        0,
    )?;

    let grey = Scalar::all(200.0);
    imgproc::line(frame, centroid, cv_point(data.target), grey, 2, imgproc::LINE_8, 0)?;
    imgproc::put_text(
        frame,
        &format!("Dist: {}px", data.distance),
        Point::new(40, 140),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.8,
        grey,
        2,
        imgproc::LINE_8,
        false,
    )
}
