//! Strategy prompt generator
//!
//! Picks a structured response plan by task type and role. Resolution order:
//! exact (task, role) template, then the task's coordinator template, then a
//! generic emergency-response plan for unknown tasks.

use serde::{Deserialize, Serialize};

/// Kind of operation a strategy is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Rescue,
    Distribution,
    Evacuation,
    Communication,
}

impl TaskType {
    /// Parse a task type name; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rescue" => Some(TaskType::Rescue),
            "distribution" => Some(TaskType::Distribution),
            "evacuation" => Some(TaskType::Evacuation),
            "communication" => Some(TaskType::Communication),
            _ => None,
        }
    }
}

/// Role of the person the strategy is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    Responder,
}

impl Role {
    /// Parse a role name; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coordinator" => Some(Role::Coordinator),
            "responder" => Some(Role::Responder),
            _ => None,
        }
    }
}

/// Fixed strategy templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyTemplate {
    RescueCoordinator,
    RescueResponder,
    DistributionCoordinator,
    EvacuationCoordinator,
    CommunicationCoordinator,
    Generic,
}

/// Resolve the template for a (task, role) pair
pub fn select_template(task: Option<TaskType>, role: Option<Role>) -> StrategyTemplate {
    match (task, role) {
        (Some(TaskType::Rescue), Some(Role::Responder)) => StrategyTemplate::RescueResponder,
        (Some(TaskType::Rescue), _) => StrategyTemplate::RescueCoordinator,
        (Some(TaskType::Distribution), _) => StrategyTemplate::DistributionCoordinator,
        (Some(TaskType::Evacuation), _) => StrategyTemplate::EvacuationCoordinator,
        (Some(TaskType::Communication), _) => StrategyTemplate::CommunicationCoordinator,
        (None, _) => StrategyTemplate::Generic,
    }
}

/// Generate a strategy prompt for `context`
pub fn generate(context: &str, task_type: &str, role: &str) -> String {
    let template = select_template(TaskType::parse(task_type), Role::parse(role));
    render(template, context)
}

/// Render a template with `context` interpolated
pub fn render(template: StrategyTemplate, context: &str) -> String {
    match template {
        StrategyTemplate::RescueCoordinator => format!(
            "RESCUE COORDINATION STRATEGY\n\
             Context: {context}\n\
             \n\
             1. Situation Assessment\n\
             \x20  - Map affected zones and estimate the number of people trapped\n\
             \x20  - Rank sites by immediate danger to life\n\
             \x20  - Confirm which access routes are passable\n\
             \n\
             2. Resource Deployment\n\
             \x20  - Assign rescue teams to priority sites\n\
             \x20  - Stage equipment, medical kits and transport near each zone\n\
             \x20  - Keep a reserve team for newly reported cases\n\
             \n\
             3. Safety & Communication\n\
             \x20  - Set check-in intervals for every field team\n\
             \x20  - Define a shared radio channel and fallback mesh relay\n\
             \x20  - Brief teams on structural and environmental hazards\n\
             \n\
             4. Monitoring & Adjustment\n\
             \x20  - Track rescues completed against open reports\n\
             \x20  - Re-prioritize as conditions change\n\
             \x20  - Log incidents for after-action review"
        ),
        StrategyTemplate::RescueResponder => format!(
            "RESCUE RESPONDER FIELD PLAN\n\
             Context: {context}\n\
             \n\
             1. Scene Assessment\n\
             \x20  - Check the scene for hazards before entering\n\
             \x20  - Locate victims and note their condition\n\
             \x20  - Report your position to the coordinator\n\
             \n\
             2. Rescue Execution\n\
             \x20  - Work in pairs and use the assigned equipment\n\
             \x20  - Treat life-threatening injuries first\n\
             \x20  - Move victims to the nearest safe point\n\
             \n\
             3. Personal Safety & Communication\n\
             \x20  - Keep your radio on the team channel\n\
             \x20  - Withdraw immediately if conditions deteriorate\n\
             \x20  - Confirm every hand-off of a victim\n\
             \n\
             4. Status Reporting\n\
             \x20  - Report rescues completed and victims remaining\n\
             \x20  - Flag needs for additional equipment or medical support\n\
             \x20  - Check in at every interval"
        ),
        StrategyTemplate::DistributionCoordinator => format!(
            "RESOURCE DISTRIBUTION STRATEGY\n\
             Context: {context}\n\
             \n\
             1. Needs Assessment\n\
             \x20  - Estimate demand from population and reported needs\n\
             \x20  - Identify vulnerable groups requiring priority access\n\
             \x20  - Inventory available supplies\n\
             \n\
             2. Distribution Coordination\n\
             \x20  - Set up distribution checkpoints across affected areas\n\
             \x20  - Plan supply routes around known bottlenecks\n\
             \x20  - Allocate volunteers to each checkpoint\n\
             \n\
             3. Safety & Communication\n\
             \x20  - Announce checkpoint locations and hours\n\
             \x20  - Keep queues orderly and accessible\n\
             \x20  - Share stock levels between checkpoints\n\
             \n\
             4. Monitoring & Equity\n\
             \x20  - Track quantities handed out per area\n\
             \x20  - Rebalance stock toward under-served zones\n\
             \x20  - Record unmet needs for the next cycle"
        ),
        StrategyTemplate::EvacuationCoordinator => format!(
            "EVACUATION STRATEGY\n\
             Context: {context}\n\
             \n\
             1. Threat Assessment\n\
             \x20  - Determine the threat and the time available\n\
             \x20  - Define the evacuation zone boundaries\n\
             \x20  - Identify residents who need assistance to move\n\
             \n\
             2. Route & Transport Coordination\n\
             \x20  - Select primary and alternate evacuation routes\n\
             \x20  - Designate assembly points and shelters\n\
             \x20  - Assign transport to assembly points\n\
             \n\
             3. Safety & Public Communication\n\
             \x20  - Issue evacuation orders through every available channel\n\
             \x20  - Provide instructions in the languages spoken locally\n\
             \x20  - Keep routes clear of incoming traffic\n\
             \n\
             4. Monitoring & Accountability\n\
             \x20  - Count arrivals at each shelter\n\
             \x20  - Follow up on residents not yet accounted for\n\
             \x20  - Update the plan as the threat evolves"
        ),
        StrategyTemplate::CommunicationCoordinator => format!(
            "COMMUNICATION STRATEGY\n\
             Context: {context}\n\
             \n\
             1. Channel Assessment\n\
             \x20  - Check which networks are operating\n\
             \x20  - Identify groups without reliable access to information\n\
             \x20  - List the agencies involved in the response\n\
             \n\
             2. Channel Coordination\n\
             \x20  - Establish primary and backup emergency channels\n\
             \x20  - Assign a liaison to each response agency\n\
             \x20  - Enable mesh relays where networks are down\n\
             \n\
             3. Message Safety & Clarity\n\
             \x20  - Use short, verified messages\n\
             \x20  - Provide multilingual versions of every alert\n\
             \x20  - Correct misinformation quickly\n\
             \n\
             4. Monitoring & Redundancy\n\
             \x20  - Confirm delivery of critical messages\n\
             \x20  - Test backup channels regularly\n\
             \x20  - Train personnel on emergency procedures"
        ),
        StrategyTemplate::Generic => format!(
            "EMERGENCY RESPONSE STRATEGY\n\
             Context: {context}\n\
             \n\
             1. Immediate Assessment\n\
             \x20  - Identify immediate risks to life and property\n\
             \x20  - Determine the affected area and population\n\
             \n\
             2. Resource Coordination\n\
             \x20  - Match available teams and supplies to critical needs\n\
             \x20  - Coordinate with other responding agencies\n\
             \n\
             3. Safety & Communication\n\
             \x20  - Protect responders and the public\n\
             \x20  - Keep all parties informed through agreed channels\n\
             \n\
             4. Monitoring & Follow-up\n\
             \x20  - Track progress against priorities\n\
             \x20  - Adjust the plan as the situation develops"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: &str = "river overflow in district 4";

    fn section_headers(prompt: &str) -> Vec<&str> {
        prompt
            .lines()
            .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .collect()
    }

    #[test]
    fn test_rescue_responder_differs_from_coordinator() {
        assert_ne!(
            generate(CTX, "rescue", "responder"),
            generate(CTX, "rescue", "coordinator")
        );
    }

    #[test]
    fn test_unknown_task_uses_generic_template() {
        let prompt = generate(CTX, "unknown_type", "x");
        assert_eq!(prompt, render(StrategyTemplate::Generic, CTX));
        assert!(prompt.contains(CTX));
        assert_eq!(section_headers(&prompt).len(), 4);
    }

    #[test]
    fn test_unknown_role_falls_back_to_coordinator() {
        assert_eq!(
            generate(CTX, "evacuation", "volunteer"),
            generate(CTX, "evacuation", "coordinator")
        );
    }

    #[test]
    fn test_known_role_without_template_falls_back_to_coordinator() {
        assert_eq!(
            generate(CTX, "distribution", "responder"),
            generate(CTX, "distribution", "coordinator")
        );
    }

    #[test]
    fn test_selection_table() {
        use StrategyTemplate::*;
        let cases = [
            ("rescue", "coordinator", RescueCoordinator),
            ("rescue", "responder", RescueResponder),
            ("distribution", "coordinator", DistributionCoordinator),
            ("evacuation", "coordinator", EvacuationCoordinator),
            ("communication", "coordinator", CommunicationCoordinator),
            ("other", "coordinator", Generic),
        ];
        for (task, role, expected) in cases {
            assert_eq!(
                select_template(TaskType::parse(task), Role::parse(role)),
                expected,
                "{task}/{role}"
            );
        }
    }

    #[test]
    fn test_every_template_has_four_ordered_sections() {
        use StrategyTemplate::*;
        for template in [
            RescueCoordinator,
            RescueResponder,
            DistributionCoordinator,
            EvacuationCoordinator,
            CommunicationCoordinator,
            Generic,
        ] {
            let prompt = render(template, CTX);
            let headers = section_headers(&prompt);
            assert_eq!(headers.len(), 4, "{template:?}");
            for (i, header) in headers.iter().enumerate() {
                assert!(header.starts_with(&format!("{}. ", i + 1)));
            }
            assert!(prompt.contains(&format!("Context: {CTX}")));
            assert!(prompt.lines().any(|l| l.starts_with("   - ")));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TaskType::parse(" Rescue "), Some(TaskType::Rescue));
        assert_eq!(Role::parse("RESPONDER"), Some(Role::Responder));
        assert_eq!(TaskType::parse("other"), None);
    }

    #[test]
    fn test_empty_context() {
        let prompt = generate("", "rescue", "coordinator");
        assert!(prompt.contains("Context: \n"));
    }
}
