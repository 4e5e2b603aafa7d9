//! House rules for a channel's game.

/// Configuration options for a blackjack game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjengine::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(8)
///     .with_reshuffle_threshold(100)
///     .with_special_bets(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks in a fresh shoe.
    pub decks: u8,
    /// A shoe with fewer cards than this is replaced before dealing.
    pub reshuffle_threshold: usize,
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
    /// Whether the double-down/insurance and split phases run after dealing.
    pub special_bets: bool,
    /// Whether insurance is offered against a dealer Ace.
    pub insurance: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            reshuffle_threshold: 75,
            stand_on_soft_17: true,
            special_bets: false,
            insurance: true,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the remaining-card count below which the shoe is replaced.
    ///
    /// Zero disables the threshold; an exhausted shoe is still replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameOptions;
    ///
    /// let options = GameOptions::default().with_reshuffle_threshold(0);
    /// assert_eq!(options.reshuffle_threshold, 0);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    /// Sets whether dealer stands on soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on_soft_17(false);
    /// assert!(!options.stand_on_soft_17);
    /// ```
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets whether the special-bet phases run after dealing.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameOptions;
    ///
    /// let options = GameOptions::default().with_special_bets(true);
    /// assert!(options.special_bets);
    /// ```
    #[must_use]
    pub const fn with_special_bets(mut self, enabled: bool) -> Self {
        self.special_bets = enabled;
        self
    }

    /// Sets whether insurance is offered.
    ///
    /// # Example
    ///
    /// ```
    /// use bjengine::GameOptions;
    ///
    /// let options = GameOptions::default().with_insurance(false);
    /// assert!(!options.insurance);
    /// ```
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }
}
