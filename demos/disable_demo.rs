//! Same card twice, shadow on and off, to eyeball the disable path.
//!
//! Run with: cargo run --example disable_demo

use umbra::prelude::*;

fn card(x_offset: f32, shadowed: bool) -> Container {
    container()
        .padding(Padding {
            left: x_offset,
            top: 20.0,
            right: 0.0,
            bottom: 0.0,
        })
        .child(
            shadow_layout()
                .shadowed(shadowed)
                .shadow_radius(14.0)
                .shadow_distance(7.0)
                .child(block(120.0, 80.0, Color::from_hex(0x607D8B))),
        )
}

fn main() {
    env_logger::init();

    let mut scene = container()
        .background(Color::WHITE)
        .min_width(440.0)
        .min_height(200.0)
        .child(card(20.0, true))
        .child(card(240.0, false));

    let Some(frame) = render_root(&mut scene, 440, 200) else {
        eprintln!("zero-sized frame");
        return;
    };
    if let Err(err) = save_png(&frame, "disable_demo.png") {
        eprintln!("failed to write disable_demo.png: {err}");
        return;
    }
    println!("wrote disable_demo.png");
}
