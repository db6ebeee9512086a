//! Export display-grid series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::DisplayCurves;
use crate::error::AppError;

/// Write one row per display-grid quantity.
pub fn write_series_csv(path: &Path, curves: &DisplayCurves) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(&mut file, curves)
}

fn write_series<W: Write>(out: &mut W, curves: &DisplayCurves) -> Result<(), AppError> {
    writeln!(
        out,
        "quantity,price,total_revenue,total_cost_linear,total_cost_quadratic,profit"
    )
    .map_err(|e| AppError::Io(format!("Failed to write export CSV header: {e}")))?;

    for i in 0..curves.len() {
        writeln!(
            out,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            curves.quantity[i],
            curves.price[i],
            curves.revenue[i],
            curves.cost_linear[i],
            curves.cost_quadratic[i],
            curves.profit[i],
        )
        .map_err(|e| AppError::Io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let curves = DisplayCurves {
            quantity: vec![0.0, 1.0],
            price: vec![5.0, 4.0],
            revenue: vec![0.0, 4.0],
            cost_linear: vec![1.0, 2.0],
            cost_quadratic: vec![1.0, 3.0],
            profit: vec![-1.0, 1.0],
        };
        let mut buf = Vec::new();
        write_series(&mut buf, &curves).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("quantity,price"));
        assert_eq!(
            lines[2],
            "1.000000,4.000000,4.000000,2.000000,3.000000,1.000000"
        );
    }
}
