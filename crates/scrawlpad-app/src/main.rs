//! Scrawlpad demo binary.
//!
//! Runs a scripted drawing session against the shared document: brush
//! strokes, an eraser pass, a simulated remote peer update, then exports
//! the painted surface as a PNG.

mod app;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::{error, info};

use scrawlpad_core::crdt::ShapeDocument;
use scrawlpad_core::mapper::{ClientPosition, PointMapper};
use scrawlpad_core::presence::PeerMetadata;
use scrawlpad_core::sync::{encode_update, ServerMessage};
use scrawlpad_core::tools::ToolKind;
use scrawlpad_core::{ClientConfig, CollabClient};
use scrawlpad_render::Surface;

use app::{AppError, DrawingApp};

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 400;
const DOCUMENT_KEY: &str = "drawing-panel";
const OUTPUT_PATH: &str = "scrawlpad.png";

fn main() {
    env_logger::init();
    info!("Starting Scrawlpad");

    // The whole session shares one failure path: anything that goes wrong
    // is logged here and the canvas stays non-interactive.
    if let Err(err) = run() {
        error!("session failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = ClientConfig {
        address: std::env::args()
            .nth(1)
            .unwrap_or_else(|| ClientConfig::default().address),
        ..ClientConfig::default()
    };
    info!("client {} connecting to {}", config.metadata.username, config.address);

    let doc = ShapeDocument::new();
    let mut client = CollabClient::new(config);
    client.activate()?;
    client.attach(&doc, DOCUMENT_KEY)?;
    client.sync(&doc)?;
    info!("status: {}", client.status_line());

    // The drawing panel sits at an offset inside the page.
    let mapper = PointMapper::new(kurbo::Vec2::new(8.0, 8.0));
    let mut app = DrawingApp::new(doc, client, mapper, CANVAS_WIDTH, CANVAS_HEIGHT)?;

    script_session(&mut app)?;

    write_png(Path::new(OUTPUT_PATH), app.renderer().surface())?;
    info!(
        "wrote {OUTPUT_PATH} ({} strokes in document)",
        app.doc().stroke_count()
    );
    Ok(())
}

/// The scripted stand-in for live pointer input.
fn script_session(app: &mut DrawingApp) -> Result<(), AppError> {
    // A horizontal brush stroke. Client coordinates include the panel
    // offset the mapper strips off.
    app.pointer_down(ClientPosition::new(58.0, 108.0))?;
    for i in 1..=20 {
        app.pointer_move(ClientPosition::new(58.0 + i as f64 * 10.0, 108.0))?;
    }
    app.pointer_up();

    // A thicker diagonal stroke.
    app.set_stroke_width(9.0);
    app.pointer_down(ClientPosition::new(108.0, 158.0))?;
    for i in 1..=15 {
        app.pointer_move(ClientPosition::new(
            108.0 + i as f64 * 12.0,
            158.0 + i as f64 * 8.0,
        ))?;
    }
    app.pointer_up();

    // Erase a patch out of the first stroke; local pixels only.
    app.set_tool(ToolKind::Eraser);
    app.set_stroke_width(20.0);
    app.pointer_down(ClientPosition::new(150.0, 108.0))?;
    for i in 1..=6 {
        app.pointer_move(ClientPosition::new(150.0 + i as f64 * 4.0, 108.0))?;
    }
    app.pointer_up();
    app.set_tool(ToolKind::Brush);

    // Another client joins and draws; its update arrives as a sync
    // message and repaints the canvas (which also brings back the pixels
    // erased above).
    let remote = remote_peer_update()?;
    app.handle_server_message(&remote);
    let roster = peers_changed_message(app.client().username())?;
    app.handle_server_message(&roster);

    Ok(())
}

/// Build the sync message a second peer would have sent.
fn remote_peer_update() -> Result<String, AppError> {
    let remote = ShapeDocument::new();
    let id = remote.begin_stroke(
        kurbo::Point::new(100.0, 300.0),
        "update content by remote peer",
    )?;
    for i in 1..=10 {
        remote.append_point(
            &id,
            kurbo::Point::new(100.0 + i as f64 * 30.0, 300.0 - i as f64 * 10.0),
            "update content by remote peer",
        )?;
    }

    let msg = ServerMessage::Sync {
        from: "peer-remote".to_string(),
        data: encode_update(&remote.export_snapshot()),
    };
    Ok(serde_json::to_string(&msg)?)
}

/// Build the roster update listing both peers.
fn peers_changed_message(own_username: &str) -> Result<String, AppError> {
    let mut peers = BTreeMap::new();
    peers.insert(
        "peer-local".to_string(),
        PeerMetadata {
            username: own_username.to_string(),
        },
    );
    peers.insert(
        "peer-remote".to_string(),
        PeerMetadata {
            username: "user-remote".to_string(),
        },
    );
    Ok(serde_json::to_string(&ServerMessage::PeersChanged {
        peers,
    })?)
}

/// Encode the surface as an RGBA PNG.
fn write_png(path: &Path, surface: &Surface) -> Result<(), AppError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, surface.width(), surface.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(surface.data())?;
    Ok(())
}
