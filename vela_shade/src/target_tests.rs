//! Unit tests for ColorTarget

use glam::Vec4;

use crate::stage::interface::AttributeFormat;
use crate::target::ColorTarget;

#[test]
fn test_target_creation() {
    let target = ColorTarget::new(4, 3);
    assert_eq!(target.width(), 4);
    assert_eq!(target.height(), 3);
    assert_eq!(target.format(), AttributeFormat::R32G32B32A32_SFLOAT);
}

#[test]
fn test_target_starts_cleared() {
    let target = ColorTarget::new(2, 2);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(target.texel(x, y), Some(Vec4::ZERO));
        }
    }
}

#[test]
fn test_target_put_and_texel() {
    let mut target = ColorTarget::new(4, 4);
    let color = Vec4::new(0.25, 0.5, 0.75, 1.0);

    target.put(2, 1, color);

    assert_eq!(target.texel(2, 1), Some(color));
    assert_eq!(target.texel(1, 2), Some(Vec4::ZERO));
}

#[test]
fn test_target_clear() {
    let mut target = ColorTarget::new(3, 3);
    target.put(0, 0, Vec4::ONE);

    let gray = Vec4::new(0.5, 0.5, 0.5, 1.0);
    target.clear(gray);

    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(target.texel(x, y), Some(gray));
        }
    }
}

#[test]
fn test_target_texel_out_of_bounds() {
    let target = ColorTarget::new(2, 2);
    assert_eq!(target.texel(2, 0), None);
    assert_eq!(target.texel(0, 2), None);
    assert_eq!(target.texel(100, 100), None);
}

#[test]
fn test_target_put_out_of_bounds_is_ignored() {
    let mut target = ColorTarget::new(2, 2);
    target.put(5, 5, Vec4::ONE);

    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(target.texel(x, y), Some(Vec4::ZERO));
        }
    }
}

#[test]
fn test_target_zero_sized() {
    let target = ColorTarget::new(0, 0);
    assert_eq!(target.width(), 0);
    assert_eq!(target.height(), 0);
    assert_eq!(target.texel(0, 0), None);
}

#[test]
fn test_target_stores_out_of_range_colors() {
    // The target stores whatever the stage produced; range handling is
    // output-merging's business, not ours
    let mut target = ColorTarget::new(1, 1);
    let wild = Vec4::new(2.0, -1.0, 0.5, 3.0);
    target.put(0, 0, wild);
    assert_eq!(target.texel(0, 0), Some(wild));
}
