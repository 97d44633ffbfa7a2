mod analysis;
mod config;
mod domain;
mod error;
mod session;
mod widget;

use analysis::MockAnalysisService;
use config::AgriGisConfig;
use domain::{BoundaryRegion, LatLon};
use session::Session;
use session::messages::{MapMsg, Msg, SearchMsg, SelectMsg};
use session::state::Phase;
use std::sync::Arc;
use widget::geometry_input::DrawTool;
use widget::map_surface::LogSurface;

const MAX_RETRIES: u32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AgriGisConfig::load();
    let service = Arc::new(MockAnalysisService::new(
        &config,
        BoundaryRegion::tamil_nadu(),
    ));
    let mut session = Session::new(&config, service);
    let snapshots = session.subscribe();

    // Scripted walk through the ways of selecting: search, click, drag, trace.
    // Only the last selection's analysis is shown.
    let tx = session.sender();
    let script: Vec<Msg> = vec![
        SearchMsg::Query("Che".to_string()).into(),
        SearchMsg::Choose(0).into(),
        MapMsg::Click(LatLon::new(11.1271, 78.6569)).into(),
        MapMsg::ToggleDrawTool(DrawTool::Rectangle).into(),
        MapMsg::DragStart(LatLon::new(10.60, 78.40)).into(),
        MapMsg::DragEnd(LatLon::new(10.90, 78.80)).into(),
        MapMsg::ToggleDrawTool(DrawTool::Polygon).into(),
        MapMsg::Click(LatLon::new(9.90, 78.10)).into(),
        MapMsg::CancelShape.into(),
        MapMsg::Click(LatLon::new(10.70, 78.90)).into(),
        MapMsg::Click(LatLon::new(10.70, 79.30)).into(),
        MapMsg::Click(LatLon::new(11.05, 79.30)).into(),
        MapMsg::Click(LatLon::new(11.05, 78.90)).into(),
        MapMsg::FinishShape.into(),
    ];
    for msg in script {
        tx.send(msg)?;
    }
    session.drain();

    let mut retries = 0;
    loop {
        while session.state().is_loading() {
            session.next().await;
        }
        if session.state().phase() != Phase::Failed || retries == MAX_RETRIES {
            break;
        }
        retries += 1;
        log::info!("Retrying analysis ({}/{})", retries, MAX_RETRIES);
        session.update(SelectMsg::Retry.into());
    }
    log::info!("Final phase {:?}", snapshots.borrow().phase());

    print!("{}", session.view());
    for entry in session.map().legend() {
        println!("* {}", entry);
    }
    session.render_map(&mut LogSurface);

    session.update(SelectMsg::Clear.into());
    session.render_map(&mut LogSurface);
    Ok(())
}
