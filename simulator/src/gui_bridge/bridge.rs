use crate::gui_bridge::model::{AlarmViewModel, SectorView};
use anyhow::{anyhow, Result};
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

type SharedModel = Arc<RwLock<AlarmViewModel>>;

fn read_model<T>(state: &SharedModel, view: impl FnOnce(&AlarmViewModel) -> T) -> T {
    match state.read() {
        Ok(guard) => view(&guard),
        Err(poisoned) => view(&poisoned.into_inner()),
    }
}

fn routes(
    state: SharedModel,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let alarm_route = warp::path("alarm")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedModel| read_model(&state, warp::reply::json));

    let sectors_route = warp::path("sectors")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter)
        .map(|state: SharedModel| {
            read_model(&state, |model| {
                let sectors: &Vec<SectorView> = &model.sectors;
                warp::reply::json(sectors)
            })
        });

    alarm_route.or(sectors_route)
}

/// Publishes the latest alarm view model and optionally serves it over HTTP.
pub struct GuiBridge {
    state: SharedModel,
}

impl GuiBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AlarmViewModel::default())),
        }
    }

    /// Starts the HTTP endpoint on a background thread.
    pub fn serve(&self, address: SocketAddr) -> Result<()> {
        let routes = routes(self.state.clone());
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| anyhow!("building bridge runtime: {}", err))?;

        thread::spawn(move || {
            runtime.block_on(async move {
                match warp::serve(routes).try_bind_ephemeral(address) {
                    Ok((bound, server)) => {
                        info!("alarm bridge listening on http://{}", bound);
                        server.await;
                    }
                    Err(err) => error!("alarm bridge failed to bind {}: {}", address, err),
                }
            });
        });
        Ok(())
    }

    pub fn publish(&self, model: &AlarmViewModel) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("alarm view model lock poisoned"))?;
        *guard = model.clone();
        println!(
            "[GUI] alarm valid: {}, message: '{}', sectors: {}",
            guard.valid,
            guard.text_message,
            guard.sectors.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AlarmViewModel {
        read_model(&self.state, AlarmViewModel::clone)
    }
}

impl Default for GuiBridge {
    fn default() -> Self {
        Self::new()
    }
}
