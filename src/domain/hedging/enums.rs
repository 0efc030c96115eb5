//! Reference-data enums of the hedge accounting domain.

reference_enum! {
    /// Hedge accounting model (ASC 815 hedge category).
    #[derive(Default)]
    pub enum HedgeType {
        #[default]
        CashFlow => ("CashFlow", "Cash Flow"),
        FairValue => ("FairValue", "Fair Value"),
        NetInvestment => ("NetInvestment", "Net Investment"),
    }
}

reference_enum! {
    /// Risk being hedged.
    #[derive(Default)]
    pub enum HedgeRiskType {
        #[default]
        InterestRate => ("InterestRate", "Interest Rate"),
        ForeignExchange => ("ForeignExchange", "Foreign Exchange"),
    }
}

reference_enum! {
    /// Point in the lifecycle at which an effectiveness regression runs.
    pub enum HedgeResultType {
        Inception => ("Inception", "Inception"),
        User => ("User", "User"),
        Periodic => ("Periodic", "Periodic"),
    }
}

reference_enum! {
    /// Processing status of a hedged or hedging item.
    ///
    /// Hedged items must reach `Ha` (hedge accounting) and hedging items
    /// `Validated` before a relationship can be designated.
    pub enum ItemStatus {
        Pending => ("Pending", "Pending"),
        Validated => ("Validated", "Validated"),
        Ha => ("HA", "HA"),
        Matured => ("Matured", "Matured"),
        Terminated => ("Terminated", "Terminated"),
        Cancelled => ("Cancelled", "Cancelled"),
    }
}

reference_enum! {
    /// Instrument classification of a hedged or hedging item.
    pub enum SecurityType {
        Swap => ("Swap", "Swap"),
        CapFloor => ("CapFloor", "Cap/Floor"),
        Collar => ("Collar", "Collar"),
        Corridor => ("Corridor", "Corridor"),
        Swaption => ("Swaption", "Swaption"),
        SwapWithOption => ("SwapWithOption", "Swap With Option"),
        Debt => ("Debt", "Debt"),
        Bond => ("Bond", "Bond"),
        Loan => ("Loan", "Loan"),
        FxForward => ("FxForward", "FX Forward"),
        CrossCurrencySwap => ("CrossCurrencySwap", "Cross Currency Swap"),
        Other => ("Other", "Other"),
    }
}

impl SecurityType {
    /// Security types an option hedge may designate on the hedged side.
    pub const OPTION_HEDGED_TYPES: &'static [SecurityType] = &[
        SecurityType::CapFloor,
        SecurityType::Collar,
        SecurityType::Corridor,
        SecurityType::Swaption,
        SecurityType::SwapWithOption,
        SecurityType::Debt,
    ];

    /// Security types an option hedge may use on the hedging side.
    pub const OPTION_HEDGING_TYPES: &'static [SecurityType] = &[
        SecurityType::CapFloor,
        SecurityType::Collar,
        SecurityType::Corridor,
        SecurityType::Swaption,
        SecurityType::SwapWithOption,
    ];

    pub fn is_option_hedged_type(&self) -> bool {
        Self::OPTION_HEDGED_TYPES.contains(self)
    }

    pub fn is_option_hedging_type(&self) -> bool {
        Self::OPTION_HEDGING_TYPES.contains(self)
    }
}

reference_enum! {
    /// Kind of schedule attached to a relationship.
    pub enum OptionTimeValueAmortType {
        Amortization => ("Amortization", "Amortization"),
        OptionTimeValue => ("OptionTimeValue", "Option Time Value"),
    }
}

reference_enum! {
    /// How many instruments make up the hedging side.
    #[derive(Default)]
    pub enum HedgingInstrumentStructure {
        #[default]
        SingleInstrument => ("SingleInstrument", "Single Instrument"),
        MultipleInstruments => ("MultipleInstruments", "Multiple Instruments"),
    }
}

reference_enum! {
    /// Payment frequency of a re-designated cash-flow hedge.
    pub enum PaymentFrequency {
        Monthly => ("Monthly", "Monthly"),
        Quarterly => ("Quarterly", "Quarterly"),
        SemiAnnual => ("SemiAnnual", "Semi-Annual"),
        Annual => ("Annual", "Annual"),
        AtMaturity => ("AtMaturity", "At Maturity"),
    }
}

reference_enum! {
    /// Day-count convention.
    pub enum DayCountConv {
        Act360 => ("ACT_360", "Actual/360"),
        Act365 => ("ACT_365", "Actual/365"),
        ActAct => ("ACT_ACT", "Actual/Actual"),
        Thirty360 => ("30_360", "30/360"),
    }
}

reference_enum! {
    /// Business-day adjustment convention for payment dates.
    pub enum PayBusDayConv {
        Following => ("Following", "Following"),
        ModifiedFollowing => ("ModifiedFollowing", "Modified Following"),
        Preceding => ("Preceding", "Preceding"),
        ModifiedPreceding => ("ModifiedPreceding", "Modified Preceding"),
        Unadjusted => ("Unadjusted", "Unadjusted"),
    }
}

reference_enum! {
    /// Direction of the cash settlement paid at de-designation.
    pub enum CashPaymentType {
        Received => ("Received", "Received"),
        Paid => ("Paid", "Paid"),
        NoPayment => ("NoPayment", "No Payment"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_static_table() {
        assert_eq!(HedgeType::CashFlow.to_string(), "Cash Flow");
        assert_eq!(SecurityType::SwapWithOption.to_string(), "Swap With Option");
        assert_eq!(DayCountConv::Thirty360.to_string(), "30/360");
    }

    #[test]
    fn from_wire_name_is_case_insensitive() {
        assert_eq!(HedgeType::from_wire_name("fairvalue"), Some(HedgeType::FairValue));
        assert_eq!(ItemStatus::from_wire_name("ha"), Some(ItemStatus::Ha));
        assert_eq!(HedgeRiskType::from_wire_name("Commodity"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&ItemStatus::Ha).unwrap(), "\"HA\"");
        let parsed: DayCountConv = serde_json::from_str("\"ACT_360\"").unwrap();
        assert_eq!(parsed, DayCountConv::Act360);
    }

    #[test]
    fn every_variant_round_trips_through_wire_name() {
        for security in SecurityType::all() {
            assert_eq!(SecurityType::from_wire_name(security.wire_name()), Some(*security));
        }
        for result_type in HedgeResultType::all() {
            assert_eq!(
                HedgeResultType::from_wire_name(result_type.wire_name()),
                Some(*result_type)
            );
        }
    }

    #[test]
    fn option_hedge_type_tables() {
        assert!(SecurityType::Debt.is_option_hedged_type());
        assert!(!SecurityType::Debt.is_option_hedging_type());
        assert!(SecurityType::Swaption.is_option_hedging_type());
        assert!(!SecurityType::Bond.is_option_hedged_type());
    }

    #[test]
    fn defaults() {
        assert_eq!(HedgeType::default(), HedgeType::CashFlow);
        assert_eq!(
            HedgingInstrumentStructure::default(),
            HedgingInstrumentStructure::SingleInstrument
        );
    }
}
