//! Background provider calls. Requests run on a tokio blocking pool; results
//! come back over a channel the UI loop drains without waiting.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::backend::{CoinDetails, MarketProvider, MarketQuote};
use crate::catalog::CatalogEntry;

#[derive(Debug)]
pub enum FetchResult {
    Catalog {
        generation: u64,
        result: Result<Vec<CatalogEntry>, String>,
    },
    Quotes {
        generation: u64,
        result: Result<Vec<MarketQuote>, String>,
    },
    Details {
        id: String,
        result: Result<CoinDetails, String>,
    },
}

pub struct Fetcher {
    runtime: Option<Runtime>,
    provider: Arc<dyn MarketProvider>,
    vs_currency: String,
    tx: UnboundedSender<FetchResult>,
    rx: UnboundedReceiver<FetchResult>,
}

impl Fetcher {
    pub fn new(provider: Arc<dyn MarketProvider>, vs_currency: String) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(4)
            .thread_name("coinwatch-fetch")
            .enable_time()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self { runtime: Some(runtime), provider, vs_currency, tx, rx })
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    fn spawn(&self, job: impl FnOnce(&dyn MarketProvider, &str) -> FetchResult + Send + 'static) {
        let provider = Arc::clone(&self.provider);
        let vs_currency = self.vs_currency.clone();
        let tx = self.tx.clone();
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };
        runtime.spawn_blocking(move || {
            let result = job(provider.as_ref(), &vs_currency);
            // The receiver only goes away at shutdown.
            let _ = tx.send(result);
        });
    }

    pub fn fetch_catalog(&self, generation: u64) {
        debug!(generation, "spawning catalog fetch");
        self.spawn(move |provider, _| FetchResult::Catalog {
            generation,
            result: provider.fetch_catalog(),
        });
    }

    pub fn fetch_quotes(&self, generation: u64, ids: Vec<String>) {
        debug!(generation, count = ids.len(), "spawning quote fetch");
        self.spawn(move |provider, vs_currency| FetchResult::Quotes {
            generation,
            result: provider.fetch_quotes(&ids, vs_currency),
        });
    }

    pub fn fetch_details(&self, id: String) {
        debug!(%id, "spawning details fetch");
        self.spawn(move |provider, vs_currency| {
            let result = provider.fetch_details(&id, vs_currency);
            FetchResult::Details { id, result }
        });
    }

    /// Everything that has completed since the last call.
    pub fn drain(&mut self) -> Vec<FetchResult> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(result) => out.push(result),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    #[cfg(test)]
    pub fn recv_blocking(&mut self) -> Option<FetchResult> {
        self.rx.blocking_recv()
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        // Requests still in flight must not hold up quitting.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
