use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        AppEvent::SccComputed {
            vertices,
            edges,
            components,
            cyclic_components,
        } => {
            json!({"type":"scc_computed","vertices":vertices,"edges":edges,"components":components,"cyclic_components":cyclic_components})
        }
        AppEvent::CondensationBuilt {
            components,
            edges,
            intra_edges_dropped,
            parallel_edges_merged,
        } => {
            json!({"type":"condensation_built","components":components,"edges":edges,"intra_edges_dropped":intra_edges_dropped,"parallel_edges_merged":parallel_edges_merged})
        }
        AppEvent::TopoSorted { components } => {
            json!({"type":"topo_sorted","components":components})
        }
        AppEvent::PathsComputed {
            objective,
            reached,
            components,
        } => {
            json!({"type":"paths_computed","objective":objective,"reached":reached,"components":components})
        }
        AppEvent::DatasetFailed { dataset, error } => {
            json!({"type":"dataset_failed","dataset":dataset,"error":error})
        }
        AppEvent::Finished { stats } => json!({"type":"finished","stats":stats}),
        AppEvent::BatchFinished { stats } => json!({"type":"batch_finished","stats":stats}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}
