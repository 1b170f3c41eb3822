//! Request-scoped metric registry.
//!
//! A fresh `ScrapeRegistry` is built for every scrape request, populated by the
//! assemblers, rendered once and dropped. Target-identifying labels given at
//! construction are attached to every metric registered through it.

use std::collections::HashMap;

use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, GaugeVec, Opts, Registry};

use poolscope_core::error::{ExporterError, Result};

/// Identity and documentation of one exposed metric.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    pub subsystem: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    /// Extra constant labels on top of the registry-wide ones.
    pub const_labels: Vec<(&'static str, String)>,
    pub variable_labels: Vec<&'static str>,
}

impl MetricDescriptor {
    pub fn new(subsystem: &'static str, name: &'static str, help: &'static str) -> Self {
        Self {
            subsystem,
            name,
            help,
            const_labels: Vec::new(),
            variable_labels: Vec::new(),
        }
    }

    pub fn label(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.const_labels.push((name, value.into()));
        self
    }

    pub fn variable(mut self, names: &[&'static str]) -> Self {
        self.variable_labels.extend_from_slice(names);
        self
    }
}

pub struct ScrapeRegistry {
    registry: Registry,
    namespace: String,
    const_labels: Vec<(String, String)>,
    families: Vec<String>,
}

impl ScrapeRegistry {
    pub fn new(namespace: &str, const_labels: &[(&str, &str)]) -> Self {
        Self {
            registry: Registry::new(),
            namespace: namespace.to_string(),
            const_labels: const_labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            families: Vec::new(),
        }
    }

    /// Register and return a scalar gauge.
    pub fn gauge(&mut self, desc: MetricDescriptor) -> Result<Gauge> {
        if !desc.variable_labels.is_empty() {
            return Err(ExporterError::Assembly(format!(
                "{} has variable labels, use gauge_vec",
                self.fq_name(&desc)
            )));
        }
        let gauge = Gauge::with_opts(self.opts(&desc)).map_err(|e| self.assembly(&desc, e))?;
        self.register(&desc, gauge.clone())?;
        Ok(gauge)
    }

    /// Register and return a gauge family keyed by the descriptor's variable labels.
    pub fn gauge_vec(&mut self, desc: MetricDescriptor) -> Result<GaugeVec> {
        let vec = GaugeVec::new(self.opts(&desc), &desc.variable_labels)
            .map_err(|e| self.assembly(&desc, e))?;
        self.register(&desc, vec.clone())?;
        Ok(vec)
    }

    /// Exporter identity, always value 1.
    pub fn exporter_info(&mut self, version: &str) -> Result<()> {
        self.gauge(
            MetricDescriptor::new("exporter", "info", "Metadata about the exporter.")
                .label("version", version),
        )?
        .set(1.0);
        Ok(())
    }

    /// Fully-qualified names of all registered families, in registration order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Snapshot of all families that currently hold samples.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    fn register<C: Collector + 'static>(&mut self, desc: &MetricDescriptor, c: C) -> Result<()> {
        self.registry
            .register(Box::new(c))
            .map_err(|e| self.assembly(desc, e))?;
        let name = self.fq_name(desc);
        self.families.push(name);
        Ok(())
    }

    fn opts(&self, desc: &MetricDescriptor) -> Opts {
        let mut labels: HashMap<String, String> = self.const_labels.iter().cloned().collect();
        for (k, v) in &desc.const_labels {
            labels.insert(k.to_string(), v.clone());
        }
        Opts::new(desc.name, desc.help)
            .namespace(self.namespace.as_str())
            .subsystem(desc.subsystem)
            .const_labels(labels)
    }

    fn fq_name(&self, desc: &MetricDescriptor) -> String {
        [self.namespace.as_str(), desc.subsystem, desc.name]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_")
    }

    fn assembly(&self, desc: &MetricDescriptor, e: prometheus::Error) -> ExporterError {
        ExporterError::Assembly(format!("{}: {e}", self.fq_name(desc)))
    }
}
