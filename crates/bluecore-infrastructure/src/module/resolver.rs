//! Start-order resolution
//!
//! Depth-first topological sort over the declared dependency graph. Roots
//! are visited in registration order and dependencies in declaration order,
//! so the same registrations always produce the same start order.

use super::ModuleList;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::value_objects::ModuleKey;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order `modules` so that every module follows all of its dependencies
///
/// `modules` is the registration-ordered list of `(module, declared
/// dependencies)`. Fails with [`Error::MissingDependency`] when a declared
/// dependency is not in the list and with [`Error::CyclicDependency`] when no
/// order exists.
pub fn start_order(modules: &[(ModuleKey, ModuleList)]) -> Result<Vec<ModuleKey>> {
    let index: HashMap<ModuleKey, usize> = modules
        .iter()
        .enumerate()
        .map(|(i, (key, _))| (*key, i))
        .collect();

    let mut edges = Vec::with_capacity(modules.len());
    for (key, dependencies) in modules {
        let mut targets = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let target = index
                .get(dependency)
                .copied()
                .ok_or_else(|| Error::MissingDependency {
                    module: key.name(),
                    dependency: dependency.name(),
                })?;
            targets.push(target);
        }
        edges.push(targets);
    }

    let mut sorter = Sorter {
        edges: &edges,
        marks: vec![Mark::Unvisited; modules.len()],
        stack: Vec::new(),
        order: Vec::with_capacity(modules.len()),
    };
    for root in 0..modules.len() {
        if let Some(cycle) = sorter.visit(root) {
            return Err(Error::CyclicDependency {
                cycle: cycle.into_iter().map(|i| modules[i].0.name()).collect(),
            });
        }
    }

    Ok(sorter.order.into_iter().map(|i| modules[i].0).collect())
}

struct Sorter<'a> {
    edges: &'a [Vec<usize>],
    marks: Vec<Mark>,
    stack: Vec<usize>,
    order: Vec<usize>,
}

impl Sorter<'_> {
    /// Returns the offending cycle, closed on its first node
    fn visit(&mut self, node: usize) -> Option<Vec<usize>> {
        match self.marks[node] {
            Mark::Done => return None,
            Mark::InProgress => {
                let start = self.stack.iter().position(|&n| n == node).unwrap_or(0);
                let mut cycle = self.stack[start..].to_vec();
                cycle.push(node);
                return Some(cycle);
            }
            Mark::Unvisited => {}
        }

        self.marks[node] = Mark::InProgress;
        self.stack.push(node);
        let edges = self.edges;
        for &dependency in &edges[node] {
            if let Some(cycle) = self.visit(dependency) {
                return Some(cycle);
            }
        }
        self.stack.pop();
        self.marks[node] = Mark::Done;
        self.order.push(node);
        None
    }
}
