//! Proximity collision between the player car and traffic
//!
//! Cars are treated as points in the (lateral, longitudinal) plane; a hit is
//! any centre-to-centre distance under the collision threshold.

use glam::DVec2;

use super::traffic::TrafficAgent;

/// The first agent found within collision range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub agent_id: u32,
    pub distance: f64,
}

/// Scan agents in pool order and stop at the first one closer than `threshold`
pub fn first_contact(
    player: DVec2,
    agents: &[TrafficAgent],
    lane_spacing: f64,
    threshold: f64,
) -> Option<Contact> {
    agents.iter().find_map(|agent| {
        let distance = player.distance(agent.position(lane_spacing));
        (distance < threshold).then_some(Contact {
            agent_id: agent.id,
            distance,
        })
    })
}
