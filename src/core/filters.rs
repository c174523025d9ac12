use crate::models::{Coordinate, GeoTagged};
use super::distance::distance_km;

/// Check whether an item lies within `radius_km` of `center`
///
/// Untagged items never match. The boundary is inclusive.
#[inline]
pub fn is_within_radius<T: GeoTagged + ?Sized>(center: Coordinate, radius_km: f64, item: &T) -> bool {
    match item.coordinate() {
        Some(point) => distance_km(center, point) <= radius_km,
        None => false,
    }
}

/// Lazily keep the items within `radius_km` of `center`, in input order
///
/// A negative radius matches nothing. A NaN radius also matches nothing,
/// since no distance compares less-or-equal to NaN. Inputs are only read.
pub fn filter_within_radius<I>(
    center: Coordinate,
    radius_km: f64,
    items: I,
) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    I::Item: GeoTagged,
{
    let searchable = radius_km >= 0.0;
    items
        .into_iter()
        .filter(move |item| searchable && is_within_radius(center, radius_km, item))
}
