//! End-to-end analysis sessions through the ledger node

#[cfg(test)]
mod tests {
    use artist_income_analyzer::prelude::*;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    const OWNER: u8 = 1;
    const ANALYST: u8 = 4;
    const OUTSIDER: u8 = 5;

    fn incomes() -> [IncomeRecord; 3] {
        [
            IncomeRecord::new(75000, 15, 5000, 10000, 15000),
            IncomeRecord::new(60000, 12, 5000, 8000, 12000),
            IncomeRecord::new(90000, 20, 4500, 15000, 20000),
        ]
    }

    async fn node_with_artists() -> LedgerNode {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(OWNER));
        let ids = ["digital_artist_001", "traditional_painter_002", "nft_creator_003"];

        for (i, (id, income)) in ids.iter().zip(incomes()).enumerate() {
            let artist = addr(10 + i as u8);
            node.transact(artist, |c, ctx| c.register_artist(ctx, id))
                .await
                .unwrap();
            node.transact(artist, |c, ctx| c.submit_income_data(ctx, income))
                .await
                .unwrap();
        }
        node
    }

    #[tokio::test]
    async fn test_three_artist_session() {
        let node = node_with_artists().await;

        assert_eq!(node.view(|c| c.total_artists()).await, 3);
        for i in 0..3u8 {
            let profile = node
                .view_as(addr(10 + i), |c, ctx| c.get_my_profile(ctx))
                .await
                .unwrap();
            assert!(profile.is_active);
            assert_eq!(profile.artist_number, u64::from(i) + 1);
        }

        node.transact(addr(OWNER), |c, ctx| c.authorize_analyst(ctx, addr(ANALYST)))
            .await
            .unwrap();
        let session_before = node.view(|c| c.analysis_session_id()).await;

        let receipt = node
            .transact(addr(ANALYST), |c, ctx| c.generate_income_analysis(ctx))
            .await
            .unwrap();
        assert!(matches!(
            receipt.event,
            AnalyzerEvent::IncomeAnalysisGenerated { participating_artists: 3, .. }
        ));
        assert_eq!(node.view(|c| c.analysis_session_id()).await, session_before + 1);

        let rejected = node
            .transact(addr(OUTSIDER), |c, ctx| c.generate_income_analysis(ctx))
            .await;
        assert_eq!(rejected, Err(ContractError::Unauthorized(addr(OUTSIDER))));
        assert_eq!(node.view(|c| c.analysis_session_id()).await, session_before + 1);

        let report = node
            .view_as(addr(ANALYST), |c, ctx| c.get_aggregate_report(ctx, session_before))
            .await
            .unwrap();
        assert_eq!(report.total_income, 225000);
        assert_eq!(report.total_artworks_sold, 47);
    }

    #[tokio::test]
    async fn test_resubmission_replaces_earlier_record() {
        let node = node_with_artists().await;
        let artist = addr(10);

        node.transact(artist, |c, ctx| {
            c.submit_income_data(ctx, IncomeRecord::new(1000, 1, 1000, 0, 0))
        })
        .await
        .unwrap();
        node.transact(addr(OWNER), |c, ctx| c.generate_income_analysis(ctx))
            .await
            .unwrap();

        let report = node
            .view_as(addr(OWNER), |c, ctx| c.get_aggregate_report(ctx, INITIAL_SESSION_ID))
            .await
            .unwrap();
        assert_eq!(report.total_income, 1000 + 60000 + 90000);
        assert_eq!(report.income_submissions, 3);
    }

    #[tokio::test]
    async fn test_stale_records_do_not_leak_into_next_session() {
        let node = node_with_artists().await;

        node.transact(addr(OWNER), |c, ctx| c.generate_income_analysis(ctx))
            .await
            .unwrap();
        node.transact(addr(OWNER), |c, ctx| c.generate_income_analysis(ctx))
            .await
            .unwrap();

        let second = node
            .view_as(addr(OWNER), |c, ctx| {
                c.get_aggregate_report(ctx, INITIAL_SESSION_ID + 1)
            })
            .await
            .unwrap();
        assert_eq!(second.total_income, 0);
        assert_eq!(second.participating_artists, 0);
        assert_eq!(second.average_income(), None);
    }

    #[tokio::test]
    async fn test_unregistered_submissions_rejected() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(OWNER));
        let stranger = addr(42);

        let income = node
            .transact(stranger, |c, ctx| c.submit_income_data(ctx, IncomeRecord::default()))
            .await;
        let analytics = node
            .transact(stranger, |c, ctx| {
                c.submit_creative_analytics(ctx, CreativeAnalyticsRecord::default())
            })
            .await;

        assert_eq!(income, Err(ContractError::NotRegistered(stranger)));
        assert_eq!(analytics, Err(ContractError::NotRegistered(stranger)));
        assert_eq!(node.block_number().await, 1);
    }

    #[tokio::test]
    async fn test_platform_stats_reads_are_stable() {
        let node = node_with_artists().await;

        let first = node.view(|c| c.get_platform_stats()).await;
        let second = node.view(|c| c.get_platform_stats()).await;

        assert_eq!(first, second);
        assert_eq!(first.total_artists_count, 3);
        assert_eq!(first.current_session_id, INITIAL_SESSION_ID);
    }
}
