//! Stepped-sampling geometry queries over a [`TerrainGrid`].
//!
//! `path_blocked` adapts the stepped ray-traversal idiom used for
//! line-of-sight in the original sim's geo terrain module to the coarse,
//! elevation-free grid this sidecar actually receives: instead of comparing
//! sampled elevation against a ray height, each sample is tested against the
//! cell's passability directly.

use autarch_core::snapshot::{TerrainCell, TerrainGrid};
use autarch_core::types::Position;

/// Minimum horizontal distance below which a path is trivially unblocked;
/// avoids over-sampling adjacent cells.
const SAMPLE_INTERVAL_FRACTION: f64 = 0.25;

/// A cell a unit cannot path through directly (no bridge, no naval transport
/// assumed). `Bridge` cells are always passable; `Water` and `Cliff` are not.
fn is_passable(cell: TerrainCell) -> bool {
    matches!(cell, TerrainCell::Land | TerrainCell::Bridge)
}

/// True if the straight-line path from `from` to `to` crosses any
/// impassable cell. With no grid (terrain-unaware mode) nothing is ever
/// blocked.
pub fn path_blocked(grid: Option<&TerrainGrid>, from: Position, to: Position) -> bool {
    let Some(grid) = grid else {
        return false;
    };
    if grid.cols == 0 || grid.rows == 0 {
        return false;
    }

    let cell_span = grid.cell_w.min(grid.cell_h) * SAMPLE_INTERVAL_FRACTION;
    let dist = from.distance_to(&to);
    if dist < cell_span {
        return !is_passable(grid.cell_at(to));
    }

    let samples = ((dist / cell_span).ceil() as usize).max(2);
    for i in 0..=samples {
        let t = i as f64 / samples as f64;
        let sample = Position::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        if !is_passable(grid.cell_at(sample)) {
            return true;
        }
    }
    false
}

/// Nearest passable cell's center to `pos`, searching outward ring by ring.
/// Falls back to `pos` unchanged if the whole grid is impassable or absent.
pub fn nearest_land(grid: Option<&TerrainGrid>, pos: Position) -> Position {
    let Some(grid) = grid else {
        return pos;
    };
    if grid.cols == 0 || grid.rows == 0 {
        return pos;
    }
    if is_passable(grid.cell_at(pos)) {
        return pos;
    }

    let origin_col = ((pos.x / grid.cell_w) as i64).clamp(0, grid.cols as i64 - 1);
    let origin_row = ((pos.y / grid.cell_h) as i64).clamp(0, grid.rows as i64 - 1);
    let max_radius = grid.cols.max(grid.rows) as i64;

    for radius in 1..=max_radius {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr.abs() != radius && dc.abs() != radius {
                    continue;
                }
                let row = origin_row + dr;
                let col = origin_col + dc;
                if row < 0 || col < 0 || row >= grid.rows as i64 || col >= grid.cols as i64 {
                    continue;
                }
                let candidate = Position::new(
                    (col as f64 + 0.5) * grid.cell_w,
                    (row as f64 + 0.5) * grid.cell_h,
                );
                if is_passable(grid.cell_at(candidate)) {
                    return candidate;
                }
            }
        }
    }
    pos
}

/// `count` points evenly spaced on a circle of `radius` around `center`,
/// used for the scout search pattern and the known-base hunt sweep. Purely
/// geometric; does not consult the grid.
pub fn ring_points(center: Position, radius: f64, count: u32) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (count as f64);
            Position::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_grid() -> TerrainGrid {
        // 4x4 grid, a solid column of water down the middle (col 2).
        let mut cells = vec![TerrainCell::Land; 16];
        for row in 0..4 {
            cells[row * 4 + 2] = TerrainCell::Water;
        }
        TerrainGrid {
            cols: 4,
            rows: 4,
            cell_w: 10.0,
            cell_h: 10.0,
            cells,
        }
    }

    #[test]
    fn path_blocked_detects_water_column() {
        let grid = checker_grid();
        let from = Position::new(5.0, 5.0);
        let to = Position::new(35.0, 5.0);
        assert!(path_blocked(Some(&grid), from, to));
    }

    #[test]
    fn path_blocked_false_without_grid() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(1000.0, 1000.0);
        assert!(!path_blocked(None, from, to));
    }

    #[test]
    fn nearest_land_steps_off_water() {
        let grid = checker_grid();
        let water_center = Position::new(25.0, 5.0);
        let land = nearest_land(Some(&grid), water_center);
        assert!(!matches!(grid.cell_at(land), TerrainCell::Water));
    }

    #[test]
    fn ring_points_returns_requested_count() {
        let pts = ring_points(Position::new(0.0, 0.0), 100.0, 8);
        assert_eq!(pts.len(), 8);
        for p in &pts {
            assert!((p.distance_to(&Position::new(0.0, 0.0)) - 100.0).abs() < 1e-9);
        }
    }
}
