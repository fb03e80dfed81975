use opencv::{
    core::{self, Mat, Point, Size, Vec3b, Vector},
    imgproc,
    prelude::*,
};
use robo_eye::core_modules::color::{ColorProfile, HsvRange};
use robo_eye::core_modules::detection::{self, BoundingBox, Detection};

type Contours = Vector<Vector<Point>>;

/// Finds the first colour in `palette` whose largest contour exceeds
/// `min_area`. Later colours are not thresholded once one has matched.
pub fn detect(hsv: &Mat, palette: &[ColorProfile], min_area: f64) -> opencv::Result<Option<Detection>> {
    let mut failure = None;
    let candidates = palette
        .iter()
        .map_while(|profile| match largest_contour(hsv, profile) {
            Ok(found) => Some(found),
            Err(e) => {
                failure = Some(e);
                None
            }
        })
        .flatten();

    let found = detection::first_significant(candidates, min_area);
    match failure {
        Some(e) => Err(e),
        None => Ok(found),
    }
}

fn largest_contour(hsv: &Mat, profile: &ColorProfile) -> opencv::Result<Option<Detection>> {
    let mask = clean(&mask_for(hsv, profile)?)?;

    let mut contours = Contours::new();
    imgproc::find_contours(
        &mask,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut best: Option<(f64, Vector<Point>)> = None;
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        if best.as_ref().is_none_or(|(best_area, _)| area > *best_area) {
            best = Some((area, contour));
        }
    }

    let Some((area, contour)) = best else {
        return Ok(None);
    };
    let rect = imgproc::bounding_rect(&contour)?;
    Ok(Some(Detection::new(
        profile.name.as_str(),
        BoundingBox::new(rect.x, rect.y, rect.width, rect.height),
        area,
    )))
}

/// Union of the profile's HSV ranges as a binary mask.
fn mask_for(hsv: &Mat, profile: &ColorProfile) -> opencv::Result<Mat> {
    let mut mask: Option<Mat> = None;
    for range in &profile.ranges {
        let part = in_range(hsv, range)?;
        mask = Some(match mask {
            None => part,
            Some(previous) => {
                let mut merged = Mat::default();
                core::bitwise_or(&previous, &part, &mut merged, &core::no_array())?;
                merged
            }
        });
    }
    Ok(mask.unwrap_or_default())
}

fn in_range(hsv: &Mat, range: &HsvRange) -> opencv::Result<Mat> {
    let lower: Vec3b = range.lower.into();
    let upper: Vec3b = range.upper.into();
    let mut mask = Mat::default();
    core::in_range(hsv, &lower, &upper, &mut mask)?;
    Ok(mask)
}

/// Blur, then a single erode/dilate pass to drop speckle.
fn clean(mask: &Mat) -> opencv::Result<Mat> {
    let mut blurred = Mat::default();
    imgproc::gaussian_blur(mask, &mut blurred, Size::new(7, 7), 0.0, 0.0, core::BORDER_DEFAULT)?;

    let border = imgproc::morphology_default_border_value()?;
    let anchor = Point::new(-1, -1);

    let mut eroded = Mat::default();
    imgproc::erode(&blurred, &mut eroded, &Mat::default(), anchor, 1, core::BORDER_CONSTANT, border)?;

    let mut dilated = Mat::default();
    imgproc::dilate(&eroded, &mut dilated, &Mat::default(), anchor, 1, core::BORDER_CONSTANT, border)?;

    Ok(dilated)
}
