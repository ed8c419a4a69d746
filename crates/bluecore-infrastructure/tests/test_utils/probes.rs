//! Recording modules with configurable failures

use async_trait::async_trait;
use bluecore_domain::error::{Error, Result};
use bluecore_infrastructure::module::{Module, ModuleContext, ModuleFactory, ModuleList};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ProbeState {
    events: Vec<String>,
    fail_start: HashSet<&'static str>,
    fail_start_once: HashSet<&'static str>,
    fail_stop: HashSet<&'static str>,
}

/// Shared event log and failure switches
#[derive(Clone, Default)]
pub struct Probe {
    state: Arc<Mutex<ProbeState>>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `start` of module `name` fail
    pub fn fail_start(&self, name: &'static str) -> &Self {
        self.state.lock().unwrap().fail_start.insert(name);
        self
    }

    /// Make the next `start` of module `name` fail
    pub fn fail_start_once(&self, name: &'static str) -> &Self {
        self.state.lock().unwrap().fail_start_once.insert(name);
        self
    }

    /// Make `stop` of module `name` fail
    pub fn fail_stop(&self, name: &'static str) -> &Self {
        self.state.lock().unwrap().fail_stop.insert(name);
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    fn on_start(&self, name: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_start.contains(name) || state.fail_start_once.remove(name) {
            state.events.push(format!("fail {name}"));
            return Err(Error::module(name, "start refused by probe"));
        }
        state.events.push(format!("start {name}"));
        Ok(())
    }

    fn on_stop(&self, name: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(format!("stop {name}"));
        if state.fail_stop.contains(name) {
            return Err(Error::module(name, "stop refused by probe"));
        }
        Ok(())
    }
}

macro_rules! probe_module {
    ($name:ident, [$($dep:ident),*]) => {
        pub struct $name {
            probe: Probe,
        }

        impl $name {
            pub fn factory(probe: &Probe) -> ModuleFactory {
                let probe = probe.clone();
                ModuleFactory::new(move || $name { probe: probe.clone() })
            }
        }

        #[async_trait]
        impl Module for $name {
            fn list_dependencies(_list: &mut ModuleList) {
                $( _list.add::<$dep>(); )*
            }

            async fn start(&self, _ctx: &ModuleContext<'_>) -> Result<()> {
                $( _ctx.dependency::<$dep>()?; )*
                self.probe.on_start(stringify!($name))
            }

            async fn stop(&self) -> Result<()> {
                self.probe.on_stop(stringify!($name))
            }
        }
    };
}

probe_module!(A, []);
probe_module!(B, [A]);
probe_module!(F, [A, B]);
probe_module!(C, [D]);
probe_module!(D, [C]);
probe_module!(Ghost, []);
probe_module!(Orphan, [Ghost]);

/// Module that reaches for `A` without declaring it
pub struct Sneaky;

#[async_trait]
impl Module for Sneaky {
    async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        ctx.dependency::<A>()?;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Counts its lifecycle calls; meant to be injected as an instance
#[derive(Default)]
pub struct Counter {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
}

#[async_trait]
impl Module for Counter {
    async fn start(&self, _ctx: &ModuleContext<'_>) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
