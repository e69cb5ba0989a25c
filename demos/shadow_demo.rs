//! Renders three shadowed cards with different blur/distance settings.
//!
//! Run with: cargo run --example shadow_demo

use umbra::prelude::*;

fn card(x_offset: f32, radius: f32, distance: f32, angle: f32, color: Color) -> Container {
    container()
        .padding(Padding {
            left: x_offset,
            top: 20.0,
            right: 0.0,
            bottom: 0.0,
        })
        .child(
            shadow_layout()
                .shadow_radius(radius)
                .shadow_distance(distance)
                .shadow_angle(angle)
                .shadow_color(Color::rgba(0.0, 0.0, 0.0, 0.6))
                .child(block(120.0, 80.0, color)),
        )
}

fn main() {
    env_logger::init();

    let mut scene = container()
        .background(Color::from_hex(0xF5F5F5))
        .min_width(640.0)
        .min_height(240.0)
        .child(card(20.0, 6.0, 3.0, 45.0, Color::from_hex(0x3F51B5)))
        .child(card(220.0, 16.0, 8.0, 45.0, Color::from_hex(0x4CAF50)))
        .child(card(420.0, 30.0, 15.0, 90.0, Color::from_hex(0xFF5722)));

    let frame = match render_root(&mut scene, 640, 240) {
        Some(frame) => frame,
        None => {
            eprintln!("zero-sized frame");
            return;
        }
    };
    if let Err(err) = save_png(&frame, "shadow_demo.png") {
        eprintln!("failed to write shadow_demo.png: {err}");
        return;
    }
    println!("wrote shadow_demo.png");
}
