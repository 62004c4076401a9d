//! Plain-language narration of a finished feasibility result.
//!
//! The narrator only words the figures it is given. Every number in the
//! prompt comes straight from `SavingsFeasibilityResult`.

use anyhow::Result;
use spendlens_core::SavingsFeasibilityResult;

use crate::llm::LlmClient;
use crate::report::format_amount;

const SYSTEM_PROMPT: &str = "You are a personal finance assistant. \
Explain the savings feasibility clearly and honestly. \
Do not give false hope. Do not shame the user.";

/// Anything that can turn a prompt into text
pub trait TextGenerator {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

impl TextGenerator for LlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        self.complete(system, prompt).await
    }
}

pub struct Narrator<'a, G> {
    generator: &'a G,
    currency_symbol: String,
}

impl<'a, G: TextGenerator> Narrator<'a, G> {
    pub fn new(generator: &'a G, currency_symbol: impl Into<String>) -> Self {
        Self {
            generator,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn build_prompt(&self, result: &SavingsFeasibilityResult) -> String {
        let money = |x: f64| format!("{}{}", self.currency_symbol, format_amount(x));
        format!(
            "Facts (final figures, do NOT recompute anything):\n\
             - Monthly income: {income}\n\
             - Average monthly spending: {spend}\n\
             - Fixed recurring expenses: {fixed_pct:.1}% of income\n\
             - Habitual recurring expenses: {habitual_pct:.1}% of income\n\
             - Available to save per month: {available}\n\
             - Target savings: {target}\n\
             - Savings shortfall: {shortfall}\n\
             - Maximum possible habit-based reduction: {cut}\n\
             \n\
             System decision:\n\
             - Feasibility status: {verdict}\n\
             \n\
             Rules:\n\
             - If the goal is not feasible, explain why\n\
             - Explicitly state whether cutting habits alone is sufficient\n\
             - Suggest realistic next steps only if needed\n\
             - Keep tone calm, factual, and supportive\n\
             - Do NOT suggest unrealistic actions\n\
             - Do not reference internal variable names or explain calculations explicitly\n",
            income = money(result.monthly_income()),
            spend = money(result.monthly_total_spend()),
            fixed_pct = result.fixed_load_pct(),
            habitual_pct = result.habitual_load_pct(),
            available = money(result.available_to_save()),
            target = money(result.target_savings()),
            shortfall = money(result.shortfall()),
            cut = money(result.max_possible_behavioral_cut()),
            verdict = result.feasibility(),
        )
    }

    pub async fn explain(&self, result: &SavingsFeasibilityResult) -> Result<String> {
        let prompt = self.build_prompt(result);
        self.generator.generate(SYSTEM_PROMPT, &prompt).await
    }
}
