//! The fixed report column set. Consumers may hide columns but never reorder
//! or rename them; declaration order is display order.

label_enum! {
    Column => {
        SearchTerm = "Search Term",
        Impressions = "Impressions",
        Clicks = "Clicks",
        Spend = "Spend",
        Sales = "Sales",
        Orders = "Orders",
        AdType = "AD TYPE",
        Cpc = "CPC",
        ConversionRate = "Conversion Rate" | "Conv%",
        PctSpend = "% Spend",
        PctSales = "% Sales",
        Roas = "ROAS",
    }
}

#[cfg(test)]
mod tests {
    use super::Column;

    #[test]
    fn twelve_columns_in_display_order() {
        assert_eq!(Column::ALL.len(), 12);
        assert_eq!(Column::ALL[0], Column::SearchTerm);
        assert_eq!(Column::ALL[11], Column::Roas);
        let mut sorted = Column::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Column::ALL.to_vec(), "Ord must follow display order");
    }

    #[test]
    fn legacy_conversion_label_is_accepted() {
        assert_eq!("Conv%".parse::<Column>(), Ok(Column::ConversionRate));
        assert_eq!("conversion rate".parse::<Column>(), Ok(Column::ConversionRate));
        assert_eq!(Column::ConversionRate.as_str(), "Conversion Rate");
    }
}
