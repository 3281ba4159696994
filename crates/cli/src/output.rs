use anyhow::Result;
use serde_json::json;

use distmat_core::{DistanceMatrix, Point};

/// Prints the numbered point listing.
pub fn print_points(points: &[Point]) {
    println!("Points:");
    for (index, point) in points.iter().enumerate() {
        println!("{index} {point}");
    }
    println!();
}

/// Prints the matrix with two-decimal cells, one row per line.
pub fn print_matrix(matrix: &DistanceMatrix) {
    println!("Distances matrix:");
    print!("{matrix}");
}

/// Emits points and matrix rows as one JSON document on stdout.
pub fn print_json(points: &[Point], matrix: &DistanceMatrix) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&json_document(points, matrix))?);
    Ok(())
}

fn json_document(points: &[Point], matrix: &DistanceMatrix) -> serde_json::Value {
    let rows: Vec<Vec<f64>> = matrix.rows().map(|row| row.to_vec()).collect();
    json!({
        "points": points,
        "matrix": rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_document_carries_points_and_rows() {
        let points = vec![Point::new(0, 0), Point::new(3, 4)];
        let mut matrix = DistanceMatrix::zeros(2);
        matrix.set(0, 1, 5.0);
        matrix.set(1, 0, 5.0);

        let doc = json_document(&points, &matrix);
        assert_eq!(doc["points"][1]["x"], 3);
        assert_eq!(doc["points"][1]["y"], 4);
        assert_eq!(doc["matrix"][0][1], 5.0);
        assert_eq!(doc["matrix"][1][0], 5.0);
        assert_eq!(doc["matrix"][0][0], 0.0);
    }
}
