use crate::domain::graph::{Graph, SccResult};
use crate::domain::traits::{Metrics, SccDetector};

/// Tarjan's SCC algorithm over an explicit frame stack.
///
/// Components are numbered in the order they close, which is a reverse
/// topological order of the condensation. Callers should not depend on that.
pub struct TarjanSccDetector;

impl SccDetector for TarjanSccDetector {
    fn compute_scc(&self, graph: &Graph, metrics: &mut dyn Metrics) -> SccResult {
        metrics.start_timer();
        let res = tarjan_scc(graph, metrics);
        metrics.stop_timer();
        res
    }
}

const UNVISITED: usize = usize::MAX;

struct TarjanState {
    next_index: usize,
    index_of: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl TarjanState {
    fn discover(&mut self, v: usize, metrics: &mut dyn Metrics) {
        self.index_of[v] = self.next_index;
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        metrics.increment("tarjan_push");
    }

    fn close_component(&mut self, root: usize, metrics: &mut dyn Metrics) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            metrics.increment("tarjan_pop");
            component.push(w);
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

fn tarjan_scc(graph: &Graph, metrics: &mut dyn Metrics) -> SccResult {
    let n = graph.node_count();
    let mut s = TarjanState {
        next_index: 0,
        index_of: vec![UNVISITED; n],
        lowlink: vec![UNVISITED; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        components: Vec::new(),
    };

    // (vertex, position of the next out-edge to explore)
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if s.index_of[start] != UNVISITED {
            continue;
        }
        s.discover(start, metrics);
        frames.push((start, 0));

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let outs = graph.out_edges(v);

            if frame.1 < outs.len() {
                let w = outs[frame.1].v;
                frame.1 += 1;
                metrics.increment("tarjan_edge_visited");

                if s.index_of[w] == UNVISITED {
                    s.discover(w, metrics);
                    frames.push((w, 0));
                } else if s.on_stack[w] {
                    s.lowlink[v] = s.lowlink[v].min(s.index_of[w]);
                }
                continue;
            }

            // All edges of v explored: the recursive call for v returns here.
            frames.pop();
            if s.lowlink[v] == s.index_of[v] {
                s.close_component(v, metrics);
            }
            if let Some(&(parent, _)) = frames.last() {
                s.lowlink[parent] = s.lowlink[parent].min(s.lowlink[v]);
            }
        }
    }

    let components = s.components;
    let mut component_of = vec![usize::MAX; n];
    for (cid, comp) in components.iter().enumerate() {
        for &v in comp {
            component_of[v] = cid;
        }
    }

    let mut cyclic_component = vec![false; components.len()];
    for (cid, comp) in components.iter().enumerate() {
        if comp.len() > 1 {
            cyclic_component[cid] = true;
            continue;
        }
        let only = comp[0];
        if graph.out_edges(only).iter().any(|e| e.v == only) {
            cyclic_component[cid] = true;
        }
    }

    SccResult {
        component_of,
        components,
        cyclic_component,
    }
}
