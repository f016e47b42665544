//! Integration tests for the HTTP API and the node client

#[cfg(test)]
mod tests {
    use artist_income_analyzer::accounts::dev_signer;
    use artist_income_analyzer::api::create_router;
    use artist_income_analyzer::prelude::*;
    use std::sync::Arc;

    fn addr(n: u8) -> Address {
        dev_signer(n as usize).unwrap().address()
    }

    fn as_account(client: &NodeClient, n: u8) -> NodeClient {
        client.with_signer(dev_signer(n as usize).unwrap())
    }

    async fn spawn_node(owner: Address) -> NodeClient {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, owner);
        let app = create_router(Arc::new(node));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let local = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        NodeClient::new(&format!("http://{}", local), 5).unwrap()
    }

    #[tokio::test]
    async fn test_status_and_public_reads() {
        let client = spawn_node(addr(0)).await;

        assert!(client.health().await.unwrap());
        let status = client.node_status().await.unwrap();
        assert_eq!(status.chain_id, 1337);
        assert_eq!(status.block_number, 1);
        assert_eq!(status.contract_address, addr(0).create(0));
        assert_eq!(status.transaction_count, 0);

        assert_eq!(client.owner().await.unwrap(), addr(0));
        assert_eq!(client.total_artists().await.unwrap(), 0);
        assert_eq!(client.analysis_session_id().await.unwrap(), INITIAL_SESSION_ID);
    }

    #[tokio::test]
    async fn test_full_session_over_http() {
        let client = spawn_node(addr(0)).await;
        let owner = as_account(&client, 0);
        let artist = as_account(&client, 2);

        let registered = artist.register_artist("digital_artist_001").await.unwrap();
        let looked_up = client.get_receipt(registered.transaction_hash).await.unwrap();
        assert_eq!(looked_up, registered);
        artist
            .submit_income_data(&IncomeRecord::new(75000, 15, 5000, 10000, 15000))
            .await
            .unwrap();
        artist
            .submit_creative_analytics(&CreativeAnalyticsRecord::new(
                30000, 10000, 20000, 5000, 8000, 2000,
            ))
            .await
            .unwrap();
        assert!(client.is_registered_artist(addr(2)).await.unwrap());

        owner.authorize_analyst(addr(3)).await.unwrap();
        assert!(client.is_authorized_analyst(addr(3)).await.unwrap());

        let receipt = as_account(&client, 3)
            .generate_income_analysis()
            .await
            .unwrap();
        assert_eq!(receipt.from, addr(3));

        let report = owner.get_aggregate_report(INITIAL_SESSION_ID).await.unwrap();
        assert_eq!(report.total_income, 75000);
        assert_eq!(report.creative.nft_sales, 20000);

        let stats = client.get_platform_stats().await.unwrap();
        assert_eq!(stats.total_artists_count, 1);
        assert_eq!(stats.current_session_id, INITIAL_SESSION_ID + 1);

        let profile = artist.get_my_profile().await.unwrap();
        assert_eq!(profile.artist_id, "digital_artist_001");
        assert!(profile.is_active);
    }

    #[tokio::test]
    async fn test_rejections_keep_their_kind() {
        let client = spawn_node(addr(0)).await;
        let artist = as_account(&client, 2);

        artist.register_artist("artist_123").await.unwrap();
        let again = artist.register_artist("artist_123").await;
        assert!(matches!(
            again,
            Err(AppError::Contract(ContractError::AlreadyRegistered(a))) if a == addr(2)
        ));

        let stranger = as_account(&client, 4);
        assert!(matches!(
            stranger.get_my_profile().await,
            Err(AppError::Contract(ContractError::NotRegistered(_)))
        ));
        assert!(matches!(
            stranger.generate_income_analysis().await,
            Err(AppError::Contract(ContractError::Unauthorized(_)))
        ));
        assert!(matches!(
            as_account(&client, 0).get_aggregate_report(7).await,
            Err(AppError::Contract(ContractError::ReportNotFound(7)))
        ));
        assert!(matches!(
            artist.get_aggregate_report(INITIAL_SESSION_ID).await,
            Err(AppError::Contract(ContractError::Unauthorized(_)))
        ));
    }

    #[tokio::test]
    async fn test_missing_signer_and_unknown_receipt() {
        let client = spawn_node(addr(0)).await;
        let status = client.node_status().await.unwrap();
        assert_eq!(status.block_number, 1);

        assert!(matches!(
            client.generate_income_analysis().await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            client.get_receipt(B256::ZERO).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            client.is_registered_artist(Address::ZERO).await,
            Ok(false)
        ));
    }
}
