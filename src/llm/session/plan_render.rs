//! Plan rendering for UI display
//!
//! Pure functions for rendering plans to user-readable format.

use crate::llm::types::Plan;

/// Render plan for UI display
///
/// Pure function, no side effects.
/// UI displays this to user before execution.
pub fn render_plan_for_ui(plan: &Plan) -> String {
    let mut output = format!("Proposed Plan: {}\n", plan.plan_id);
    output.push_str(&format!("Intent: {}\n\n", plan.intent.to_string()));

    for (idx, step) in plan.steps.iter().enumerate() {
        output.push_str(&format!("Step {}: {}\n", idx + 1, step.tool));
        output.push_str(&format!("  Tool: {}\n", step.tool));

        // Display arguments (sorted for determinism)
        let mut args: Vec<_> = step.arguments.iter().collect();
        args.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in args {
            output.push_str(&format!("  {}: {}\n", key, value));
        }

        output.push_str(&format!("  Precondition: {}\n", step.precondition));
        if step.requires_confirmation {
            output.push_str("  Requires confirmation: YES\n");
        }
        output.push('\n');
    }

    if !plan.evidence_referenced.is_empty() {
        output.push_str(&format!(
            "Evidence cited: {}\n",
            plan.evidence_referenced.join(", ")
        ));
    }

    output
}
