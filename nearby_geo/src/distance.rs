use crate::GeoPoint;

const STATUTE_MILES_PER_DEGREE: f64 = 60.0 * 1.1515;
const METERS_PER_STATUTE_MILE: f64 = 1609.344;

/// Great-circle distance in meters between two points, using the spherical
/// law of cosines.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    // sin²+cos² does not always round to exactly one
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let theta = (a.longitude - b.longitude).to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();

    // rounding may push the term slightly outside of [-1, 1] for identical
    // or antipodal points, where acos is undefined
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    angle.to_degrees() * STATUTE_MILES_PER_DEGREE * METERS_PER_STATUTE_MILE
}
