#[cfg(test)]
mod tests {

    use ron;
    use wordle_sieve::*;

    #[test]
    fn game_result_serde() -> Result<(), Box<dyn std::error::Error>> {
        let result = GameResult::Failure {
            reason: FailureReason::MaxAttemptsReached,
            guesses: vec![Word::new("crane")?, Word::new("slate")?],
        };

        let ser = ron::to_string(&result)?;
        let deser = ron::from_str::<GameResult>(&ser)?;

        assert_eq!(deser, result);
        Ok(())
    }

    #[test]
    fn knowledge_serde_after_a_round() -> Result<(), Box<dyn std::error::Error>> {
        let bank = WordBank::from_iterator(["crane", "slate", "trace", "plate", "grate"])?;
        let mut game = Game::new(&bank, DEFAULT_MAX_ATTEMPTS);
        let guess = Word::new("crane")?;
        game.apply_feedback(guess, &get_feedback("plate", "crane")?);
        let knowledge = game.knowledge();

        let ser = ron::to_string(&knowledge)?;
        let deser = ron::from_str::<Knowledge>(&ser)?;

        assert_eq!(deser, knowledge);
        assert_eq!(deser.letters_excluded(), knowledge.letters_excluded());
        Ok(())
    }

    #[test]
    fn feedback_serde() -> Result<(), Box<dyn std::error::Error>> {
        let feedback = get_feedback("error", "rorer")?;

        let deser = ron::from_str::<Feedback>(&ron::to_string(&feedback)?)?;

        assert_eq!(deser, feedback);
        Ok(())
    }
}
