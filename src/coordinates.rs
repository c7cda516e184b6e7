/// Converts a degrees/minutes/seconds triple to signed decimal degrees.
///
/// The value is negated for the southern (`S`) and western (`W`) hemispheres.
/// Components are not range checked.
pub fn dms_to_decimal(dms: [f64; 3], reference: &str) -> f64 {
    let [degrees, minutes, seconds] = dms;
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    match reference {
        "S" | "W" => -decimal,
        _ => decimal,
    }
}
