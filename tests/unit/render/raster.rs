use super::*;
use crate::foundation::rng::Rng64;

fn px(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn empty_scene_is_background_at_device_size() {
    let vp = Viewport {
        width: 40.0,
        height: 30.0,
        device_pixel_ratio: 2.0,
    };
    let scene = Scene {
        look: None,
        cursor_visible: false,
        grid: None,
    };
    let img = rasterize(scene, vp, &Palette::default());
    assert_eq!(img.dimensions(), (80, 60));
    assert_eq!(px(&img, 0, 0), [0x0B, 0x0E, 0x1A, 255]);
    assert_eq!(px(&img, 79, 59), [0x0B, 0x0E, 0x1A, 255]);
}

#[test]
fn backdrop_alpha_follows_the_look() {
    let vp = Viewport::new(40.0, 40.0);
    let mut rng = Rng64::new(3);
    let grid = CellGrid::generate(40.0, 40.0, 20.0, 1.0, &mut rng);
    let palette = Palette::default();

    let hidden = Look::default().with_backdrop(0.0);
    let img = rasterize(
        Scene {
            look: Some(&hidden),
            cursor_visible: false,
            grid: Some(&grid),
        },
        vp,
        &palette,
    );
    assert_eq!(px(&img, 10, 10), [0x0B, 0x0E, 0x1A, 255]);

    let shown = Look::default().with_backdrop(1.0);
    let img = rasterize(
        Scene {
            look: Some(&shown),
            cursor_visible: false,
            grid: Some(&grid),
        },
        vp,
        &palette,
    );
    let center = px(&img, 10, 10);
    assert_ne!(center, [0x0B, 0x0E, 0x1A, 255]);
    // Cell gutters stay untouched.
    assert_eq!(px(&img, 0, 0), [0x0B, 0x0E, 0x1A, 255]);
}

#[test]
fn foreground_block_scales_about_the_center() {
    let vp = Viewport::new(200.0, 100.0);
    let palette = Palette::default();
    let glow = [0xED, 0xEF, 0xF6, 255];

    let full = Look::text("ABCD");
    let img = rasterize(
        Scene {
            look: Some(&full),
            cursor_visible: false,
            grid: None,
        },
        vp,
        &palette,
    );
    // 4 glyphs * 24px wide, centred: x in [52, 148).
    assert_eq!(px(&img, 100, 50), glow);
    assert_eq!(px(&img, 55, 50), glow);
    assert_eq!(px(&img, 45, 50), [0x0B, 0x0E, 0x1A, 255]);

    let half = Look::text("ABCD").with_foreground(1.0, 0.5);
    let img = rasterize(
        Scene {
            look: Some(&half),
            cursor_visible: false,
            grid: None,
        },
        vp,
        &palette,
    );
    assert_eq!(px(&img, 100, 50), glow);
    assert_eq!(px(&img, 55, 50), [0x0B, 0x0E, 0x1A, 255]);

    let gone = Look::text("ABCD").with_foreground(0.0, 1.0);
    let img = rasterize(
        Scene {
            look: Some(&gone),
            cursor_visible: false,
            grid: None,
        },
        vp,
        &palette,
    );
    assert_eq!(px(&img, 100, 50), [0x0B, 0x0E, 0x1A, 255]);
}

#[test]
fn caret_draws_only_when_visible() {
    let vp = Viewport::new(200.0, 100.0);
    let palette = Palette::default();
    let look = Look::default();
    let caret = px(
        &rasterize(
            Scene {
                look: Some(&look),
                cursor_visible: true,
                grid: None,
            },
            vp,
            &palette,
        ),
        103,
        50,
    );
    assert_eq!(caret, [0x4F, 0x8C, 0xFF, 255]);

    let off = px(
        &rasterize(
            Scene {
                look: Some(&look),
                cursor_visible: false,
                grid: None,
            },
            vp,
            &palette,
        ),
        103,
        50,
    );
    assert_eq!(off, [0x0B, 0x0E, 0x1A, 255]);
}

#[test]
fn save_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_render_raster")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("frame.png");
    let img = rasterize(
        Scene {
            look: None,
            cursor_visible: false,
            grid: None,
        },
        Viewport::new(8.0, 8.0),
        &Palette::default(),
    );
    save_png(&img, &path).unwrap();
    assert!(path.exists());
}
