//! Joint angle calculation using polar angle difference
//!
//! Calculates the interior angle at a vertex joint (the elbow for curls)
//! from the vertex→proximal and vertex→distal vectors.

/// Segments shorter than this (in pixels) make the angle meaningless
const MIN_SEGMENT_LENGTH: f32 = 0.0001;

/// Calculate the interior angle at `b` in degrees
///
/// Uses the difference of the polar angles of b→a and b→c, then folds
/// the result into [0, 180] so winding direction does not matter.
///
/// Returns angle in degrees:
/// - ~30° = fully curled (wrist near shoulder)
/// - 180° = fully straight (arm hanging)
///
/// Coincident points still produce a number (atan2 of zero is zero).
pub fn calculate_joint_angle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    let radians = (c.1 - b.1).atan2(c.0 - b.0) - (a.1 - b.1).atan2(a.0 - b.0);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// True when either limb segment has collapsed to a point
///
/// Only used for diagnostics: the angle still flows through thresholding.
pub fn is_degenerate(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    segment_length(a, b) < MIN_SEGMENT_LENGTH || segment_length(b, c) < MIN_SEGMENT_LENGTH
}

fn segment_length(p: (f32, f32), q: (f32, f32)) -> f32 {
    let dx = q.0 - p.0;
    let dy = q.1 - p.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_right_angle() {
        let angle = calculate_joint_angle((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        assert_abs_diff_eq!(angle, 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_straight_arm() {
        let angle = calculate_joint_angle((-1.0, 0.0), (0.0, 0.0), (1.0, 0.0));
        assert_abs_diff_eq!(angle, 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_folded_arm() {
        // Wrist lands on the shoulder
        let angle = calculate_joint_angle((3.0, 4.0), (0.0, 0.0), (3.0, 4.0));
        assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let shoulder = (320.0, 180.0);
        let elbow = (330.0, 260.0);
        let wrist = (300.0, 200.0);
        let forward = calculate_joint_angle(shoulder, elbow, wrist);
        let backward = calculate_joint_angle(wrist, elbow, shoulder);
        assert_abs_diff_eq!(forward, backward, epsilon = 1e-3);
    }

    #[test]
    fn test_reflex_difference_is_folded() {
        // Polar angles of 170° and -170° differ by 340°, interior angle is 20°
        let a = (170f32.to_radians().cos(), 170f32.to_radians().sin());
        let c = ((-170f32).to_radians().cos(), (-170f32).to_radians().sin());
        let angle = calculate_joint_angle(a, (0.0, 0.0), c);
        assert_abs_diff_eq!(angle, 20.0, epsilon = 1e-2);
    }

    #[test]
    fn test_always_in_range() {
        let coords = [-50.0, -3.5, 0.0, 1.0, 12.25, 640.0];
        for &ax in &coords {
            for &ay in &coords {
                for &cx in &coords {
                    for &cy in &coords {
                        let angle = calculate_joint_angle((ax, ay), (1.0, -2.0), (cx, cy));
                        assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
                    }
                }
            }
        }
    }

    #[test]
    fn test_coincident_points_are_defined() {
        let p = (100.0, 100.0);
        let angle = calculate_joint_angle(p, p, p);
        assert!(angle.is_finite());
        assert!(is_degenerate(p, p, p));
        assert!(!is_degenerate((0.0, 1.0), (0.0, 0.0), (1.0, 0.0)));
    }
}
