use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::geo::DistanceUnit;
use crate::routing::{RouteAlgorithm, RouteLeg, RoutePlan, RouteStop};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    #[default]
    PlainText,
    Json,
}

/// Structured representation of a planned route that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub total_cost: f64,
    pub unit: DistanceUnit,
    pub legs: Vec<RouteLeg>,
    pub stops: Vec<RouteStop>,
}

impl RouteSummary {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let endpoint = |stop: Option<&RouteStop>| {
            stop.map(|stop| stop.name.clone())
                .unwrap_or_else(|| "<unknown>".to_string())
        };

        Self {
            algorithm: plan.algorithm,
            start: endpoint(plan.stops.first()),
            goal: endpoint(plan.stops.last()),
            hops: plan.hop_count(),
            total_cost: plan.total_cost,
            unit: DistanceUnit::Kilometers,
            legs: plan.legs.clone(),
            stops: plan.stops.clone(),
        }
    }

    /// Render the summary using the requested mode.
    pub fn render(&self, mode: RouteRenderMode) -> Result<String> {
        match mode {
            RouteRenderMode::PlainText => Ok(self.render_plain()),
            RouteRenderMode::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "From {} to {} -> total cost = {:.1} {} ({} hops, algorithm: {})",
            self.start,
            self.goal,
            self.total_cost,
            self.unit.suffix(),
            self.hops,
            self.algorithm
        );

        if self.legs.len() > 1 {
            for leg in &self.legs {
                let _ = writeln!(
                    buffer,
                    "  leg {} -> {}: {:.1} {} ({} hops)",
                    leg.from,
                    leg.to,
                    leg.cost,
                    self.unit.suffix(),
                    leg.hops
                );
            }
        }

        for (index, stop) in self.stops.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({:.1} {})",
                index,
                stop.name,
                stop.cost,
                self.unit.suffix()
            );
        }
        buffer
    }
}

/// Direct road and great-circle distance between two cities.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceSummary {
    pub from: String,
    pub to: String,
    pub unit: DistanceUnit,
    /// Length of the road joining both cities, if they are adjacent.
    pub road: Option<f64>,
    pub great_circle: f64,
}

impl DistanceSummary {
    pub fn render(&self, mode: RouteRenderMode) -> Result<String> {
        match mode {
            RouteRenderMode::PlainText => Ok(self.render_plain()),
            RouteRenderMode::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let suffix = self.unit.suffix();
        match self.road {
            Some(road) => {
                let _ = writeln!(
                    buffer,
                    "From {} to {} -> road = {:.1} {suffix}",
                    self.from, self.to, road
                );
            }
            None => {
                let _ = writeln!(
                    buffer,
                    "From {} to {} -> no direct road",
                    self.from, self.to
                );
            }
        }
        let _ = writeln!(
            buffer,
            "great-circle = {:.1} {suffix}",
            self.great_circle
        );
        buffer
    }
}
