//! Coordinate conversion between window rects and wry rects.

use fetcher_common::Rect;

// =============================================================================
// COORDINATE CONVERSION
// =============================================================================

/// Convert a logical `Rect` to a wry `Rect`.
pub fn rect_to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

/// The full client area of a window, in logical coordinates.
pub fn window_rect(size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) -> Rect {
    let logical = size.to_logical::<f64>(scale_factor);
    Rect::from_size(logical.width, logical.height)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_converts_to_wry_rect() {
        let rect = Rect {
            x: 100.0,
            y: 50.0,
            width: 800.0,
            height: 600.0,
        };
        let wry_rect = rect_to_wry(&rect);

        match wry_rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert!((pos.x - 100.0).abs() < f64::EPSILON);
                assert!((pos.y - 50.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical position"),
        }
        match wry_rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 800.0).abs() < f64::EPSILON);
                assert!((size.height - 600.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }

    #[test]
    fn window_rect_scales_to_logical() {
        let rect = window_rect(winit::dpi::PhysicalSize::new(2048, 1536), 2.0);
        assert_eq!(rect, Rect::from_size(1024.0, 768.0));
    }

    #[test]
    fn window_rect_at_unit_scale() {
        let rect = window_rect(winit::dpi::PhysicalSize::new(1024, 768), 1.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 1024.0);
        assert_eq!(rect.height, 768.0);
    }
}
