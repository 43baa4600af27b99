//! Prompt templates for the three debate roles and the judging rubric
//!
//! Templates use `{name}` placeholders. [`fill`] substitutes them in a single
//! pass, so braces inside substituted values (the JSON format instructions,
//! an argument quoting code) are never re-read as placeholders.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::DebateError;

/// Scoring methodology injected verbatim into every judge call
pub const JUDGING_CRITERIA: &str = "This is the debate judge methodology for evaluating the argument and assigning a score out of a possible total 100 points:
Section One - Organization and Clarity - Maximum Score of 20 points assigned as follows:
0-5 points: Poorly organized, unclear structure, and difficult to follow.
6-10 points: Somewhat organized, somewhat clear structure, and moderately easy to follow.
11-15 points: Well-organized, clear structure, and easy to follow.
16-20 points: Exceptionally organized, very clear structure, and extremely easy to follow.
Section Two - Strategy & Style - Maximum Score of 40 points assigned as follows:
0-10 points: Poor strategy and style, lacks engagement, extremely underwhelming and ineffective use of rhetoric and language.
11-20 points: Fair strategy and style, somewhat engaging, underwhelming and limited use of rhetoric and language.
21-30 points: Good strategy and style, engaging, convincing, and effective use of rhetoric and language.
31-40 points: Excellent strategy and style, highly engaging, compellingly convincing, and masterful use of rhetoric and language.
Section Three - Effectiveness of Argument, Evidence, and Content - Maximum Score of 40 points assigned as follows
0-10 points: Weak argument with major logical flaws, false evidence or content, or lack of supporting evidence.
11-20 points: Somewhat effective argument with some logical flaws, limited false evidence or content, or insufficient supporting evidence.
21-30 points: Effective argument with minor logical flaws, minimal false evidence or content, or sufficient supporting evidence.
31-40 points: Highly effective argument with impeccable logic, no false evidence or content, and compelling supporting evidence.
";

/// Moderator prompt. Placeholders: `topic`, `proposition_format_instructions`
pub const MODERATOR_TEMPLATE: &str = "Act as a seasoned debate moderator who is coordinating a debate among two or more parties. Based on the topic '{topic}', you will formulate 3 propositions that could be debated by the parties. An example proposition for climate change would be \"Climate change is substantially caused by humans\". Alternatively, you could state it as a question, \"Is climate change substantially caused by humans?\n{proposition_format_instructions}";

/// Participant prompt. Placeholders: `participant`, `proposition`
pub const PARTICIPANT_TEMPLATE: &str = "Act as the participant in a multi-party debate. Your name is '{participant}.' You have been presented with the following proposition; '{proposition}' Your goal is to win the debate. To accomplish your goal, you will decide whether to make an argument for or against the proposition. Once you have decided to make an argument for or against the proposition, you will make the best possible argument. The argument will be evaluated and scored by an independent expert debate judge based on Organization and Clarity (20% of your score), Strategy & Style (40% of your score), and Effectiveness of Argument, Evidence, and Content (40% of your score). Do not provide both an argument for and an argument against. Take your time and focus on presenting your argument in a compelling, eloquent, and convincing manner to score as many points as possible and win the debate. Your argument must be no more than 300 words.";

/// Judge prompt. Placeholders: `proposition`, `participant`,
/// `participant_argument`, `judging_criteria`, `score_format_instructions`
pub const JUDGE_TEMPLATE: &str = "Act as a seasoned debate judge that is being asked to evaluate and score the arguments made by debate participants on the following proposition: '{proposition}'. {participant} made the following argument:'{participant_argument}' For the argument in question, you will evaluate the argument, conduct an assessment, and assign a score based on the following criteria and methodology:{judging_criteria} Here is a table that summarizes how overall scores correspond to the overall quality label for the argument: 81-100 points: Excellent 61-80 points: Good 36-60 points: Fair 0-35: Poor These labels should be used in providing the 2 sentence overall assessment.\n{score_format_instructions}";

/// Word limit participants are instructed to respect
pub const ARGUMENT_WORD_LIMIT: usize = 300;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Names of the placeholders in a template, in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for caps in placeholder_pattern().captures_iter(template) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Substitute every `{name}` in `template` with its value
///
/// Fails with [`DebateError::Template`] when a placeholder has no value.
/// Values that are supplied but unused are ignored.
pub fn fill(template: &str, values: &[(&str, &str)]) -> Result<String, DebateError> {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut last = 0;

    for caps in placeholder_pattern().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = values
            .iter()
            .find(|(k, _)| *k == name.as_str())
            .map(|(_, v)| *v)
            .ok_or_else(|| DebateError::Template(name.as_str().to_string()))?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}
