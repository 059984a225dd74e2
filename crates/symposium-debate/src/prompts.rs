//! Prompt templates for each debate phase and for the judge
//!
//! Everything here is a pure function of its inputs: the orchestrator reads
//! transcripts by agent index and hands the latest statements in as
//! [`Statement`]s, so prompt text never depends on completion timing.

use crate::types::{DebateType, Stance};

/// Stand-in text for an agent that has not spoken yet
pub const NO_STATEMENT: &str = "(no statement recorded)";

/// An agent's most recent statement, as fed into critique and defense prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub name: &'a str,
    pub content: Option<&'a str>,
}

impl<'a> Statement<'a> {
    pub fn new(name: &'a str, content: Option<&'a str>) -> Self {
        Self { name, content }
    }

    fn text(&self) -> &'a str {
        self.content.unwrap_or(NO_STATEMENT)
    }
}

/// Opening statement prompt for one agent
///
/// Affirmative and negative stances get a persuasive-advocacy template;
/// neutral agents get the scholarly-analysis template.
pub fn position_prompt(topic: &str, stance: Stance) -> String {
    match stance {
        Stance::Affirmative => format!(
            r#"[POSITION ROUND - Affirmative Position]
You are an expert debater assigned to argue the AFFIRMATIVE position on:
    "{topic}"

Present the strongest possible case FOR this position, even if you might personally disagree.

- Present a clear AFFIRMATIVE position in at most 250 words
- Support your position with 3-5 verified facts, each with an MLA citation
- Anticipate and preemptively address key counterarguments
- Use precise, measured language focused on your strongest points
- End with a 1-to-10 "Confidence Index" based on your supporting evidence

Your goal is to be persuasive while maintaining intellectual honesty."#
        ),
        Stance::Negative => format!(
            r#"[POSITION ROUND - Negative Position]
You are an expert debater assigned to argue the NEGATIVE position on:
    "{topic}"

Present the strongest possible case AGAINST this position, even if you might personally agree.

- Present a clear NEGATIVE position in at most 250 words
- Support your critique with 3-5 verified facts, each with an MLA citation
- Identify and emphasize key flaws in the affirmative position
- Use precise, measured language focused on the weakest points of the opposing view
- End with a 1-to-10 "Confidence Index" based on your supporting evidence

Your goal is to be persuasive while maintaining intellectual honesty."#
        ),
        Stance::Neutral => format!(
            r#"[POSITION ROUND - Analysis]
You are a scholarly expert analyzing the topic:
    "{topic}"

Present a well-reasoned position based on evidence and critical thinking.

- Present a clear position in at most 250 words
- Support your position with 3-5 verified facts, each with an MLA citation
- Consider multiple perspectives and potential counterarguments
- Use precise, measured language focused on the strongest evidence
- End with a 1-to-10 "Confidence Index" based on your supporting evidence

Your goal is to provide an informed, balanced analysis."#
        ),
    }
}

/// Shared critique prompt listing every agent's latest statement
pub fn critique_prompt(statements: &[Statement<'_>]) -> String {
    let joined = statements
        .iter()
        .enumerate()
        .map(|(i, s)| format!("AGENT {} ({}):\n{}", i + 1, s.name, s.text()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"[CRITIQUE ROUND - Target & Destroy]
Below are your opponents' latest positions. Your task: exploit every weakness.
{joined}

For EACH opponent, deliver:
1. Bullseye Summary - Rephrase their core claim in at most 20 words.
2. Critical Hit List - Up to 3 numbered attacks that expose logical fallacies, stale data, or citation errors.
   - Quote or paraphrase the exact line you're striking.
   - Justify the strike with counter-evidence (MLA-cite) or logic.
3. Damage Assessment - Rate how badly the hit weakens their case on a 0-10 scale.

Write in compact battle-dispatch style: no pleasantries, no filler. Prioritize precision and lethal accuracy."#
    )
}

/// Defense prompt for the agent at `speaker`, built from everyone else's critiques
pub fn defense_prompt(statements: &[Statement<'_>], speaker: usize) -> String {
    let critiques = statements
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != speaker)
        .map(|(_, s)| format!("FROM {}:\n{}", s.name, s.text()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"[DEFENSE ROUND - Counter-Punch]
The following critiques were leveled at you:
{critiques}

For EACH critique aimed at your own position:
- Concede or Counter: either concede in at most 10 words or launch a rebuttal in at most 100 words.
- If countering, supply one fresh piece of evidence or reasoning (MLA-cite) not used before.
- Update your Fragility Index (only if justified) and explain the change in one sentence.

Close with a 2-sentence victory path: what remaining proof would definitively settle the issue in your favor?

Keep the tone sharp, confident, and ruthlessly factual. No rhetorical fluff."#
    )
}

/// Verdict request for the judge, embedding the pretty-printed debate state
pub fn judge_prompt(debate_type: DebateType, state_json: &str) -> String {
    match debate_type {
        DebateType::Binary => format!(
            r#"You are the sole adjudicator of a factual debate where the goal is objective correctness.

Your job:
1. Determine which position is most factually accurate and well-supported by evidence.
   - Evaluate each position on factual accuracy, quality of citations and logical consistency.
   - Assign a correctness score (0-1) to each agent.

2. Audit DEFENSE compliance for each agent against ALL FOUR rules.
   - Concede-or-Counter: exactly one of a concession of at most 10 words or a rebuttal of at most 100 words.
   - One fresh citation: at most ONE new MLA citation appears.
   - Updated Fragility Index: present, changed only when justified, change explained in at most 1 sentence.
   - Roadmap to definitive proof: concludes with exactly 2 sentences describing decisive future evidence.

   For any violation, subtract 0.10 from that agent's correctness score (never below 0).

3. Return a JSON object with exactly these keys:
   {{
     "most_correct_agent": "<name of agent with highest correctness score>",
     "correctness_scores": {{"<agent_name>": <score 0-1>}},
     "key_facts": ["<3-5 key factual points established in the debate>"],
     "explanation": "<concise reasoning, at most 75 words>"
   }}

DEBATE_STATE_JSON:
{state_json}"#
        ),
        DebateType::NonBinary => format!(
            r#"You are the sole adjudicator of an exploratory debate where the goal is ideation and topic exploration.

Your job:
1. Evaluate the quality of exploration and ideation.
   - Assess each position on novelty of ideas, breadth of perspectives and insightful connections.
   - Assign an exploration score (0-1) to each agent.

2. Identify key insights and novel perspectives that emerged during the debate.
   - Extract the 3-5 most valuable ideas from the entire debate.
   - Note unexpected connections or synthesis between initially different positions.

3. Return a JSON object with exactly these keys:
   {{
     "most_insightful_agent": "<name of agent with highest exploration score>",
     "exploration_scores": {{"<agent_name>": <score 0-1>}},
     "key_insights": ["<3-5 most valuable ideas from the debate>"],
     "novel_connections": ["<unexpected connections or synthesis points>"],
     "explanation": "<concise reasoning, at most 75 words>"
   }}

DEBATE_STATE_JSON:
{state_json}"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements() -> Vec<Statement<'static>> {
        vec![
            Statement::new("Alice", Some("Coffee improves focus (Smith 2019).")),
            Statement::new("Bob", Some("Coffee disrupts sleep (Lee 2020).")),
            Statement::new("Carol", None),
        ]
    }

    #[test]
    fn test_position_templates_follow_stance() {
        let topic = "Is coffee healthy?";
        assert!(position_prompt(topic, Stance::Affirmative).contains("case FOR"));
        assert!(position_prompt(topic, Stance::Negative).contains("case AGAINST"));

        let neutral = position_prompt(topic, Stance::Neutral);
        assert!(neutral.starts_with("[POSITION ROUND - Analysis]"));
        assert!(neutral.contains("\"Is coffee healthy?\""));
    }

    #[test]
    fn test_critique_labels_every_agent() {
        let prompt = critique_prompt(&statements());
        assert!(prompt.starts_with("[CRITIQUE ROUND"));
        assert!(prompt.contains("AGENT 1 (Alice):\nCoffee improves focus (Smith 2019)."));
        assert!(prompt.contains("AGENT 2 (Bob):\nCoffee disrupts sleep (Lee 2020)."));
        assert!(prompt.contains(&format!("AGENT 3 (Carol):\n{}", NO_STATEMENT)));
        assert!(prompt.ends_with("Prioritize precision and lethal accuracy."));
    }

    #[test]
    fn test_defense_excludes_speaker() {
        let prompt = defense_prompt(&statements(), 0);
        assert!(prompt.starts_with("[DEFENSE ROUND"));
        assert!(!prompt.contains("FROM Alice:"));
        assert!(!prompt.contains("Smith 2019"));
        assert!(prompt.contains("FROM Bob:\nCoffee disrupts sleep (Lee 2020)."));
        assert!(prompt.contains("FROM Carol:"));
        assert!(prompt.ends_with("ruthlessly factual. No rhetorical fluff."));
    }

    #[test]
    fn test_judge_prompt_by_debate_type() {
        let binary = judge_prompt(DebateType::Binary, "{\"round\": 0}");
        assert!(binary.contains("adjudicator"));
        assert!(binary.contains("correctness score"));
        assert!(binary.contains("\"most_correct_agent\""));
        assert!(binary.ends_with("{\"round\": 0}"));

        let exploratory = judge_prompt(DebateType::NonBinary, "{}");
        assert!(exploratory.contains("\"most_insightful_agent\""));
        assert!(!exploratory.contains("correctness score"));
    }
}
