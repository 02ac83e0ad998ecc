use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["srmiggy"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_login_with_username() {
    let cli = Cli::try_parse_from(["srmiggy", "login", "--username", "asha", "--password", "pw"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Login { ref username, password: Some(ref p) }) if username == "asha" && p == "pw"
    ));
}

#[test]
fn parses_menu_veg_filter() {
    let cli = Cli::try_parse_from(["srmiggy", "menu", "4", "--veg"]).unwrap();
    match cli.command {
        Some(Commands::Menu {
            vendor_id,
            veg,
            non_veg,
        }) => {
            assert_eq!(vendor_id, 4);
            assert_eq!(Commands::menu_filter(veg, non_veg), MenuFilter::Veg);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn menu_filters_are_mutually_exclusive() {
    let result = Cli::try_parse_from(["srmiggy", "menu", "4", "--veg", "--non-veg"]);
    assert!(result.is_err());
}

#[test]
fn menu_without_filter_shows_everything() {
    assert_eq!(Commands::menu_filter(false, false), MenuFilter::All);
    assert_eq!(Commands::menu_filter(false, true), MenuFilter::NonVeg);
}

#[test]
fn parses_cart_add_defaults() {
    let cli = Cli::try_parse_from(["srmiggy", "cart", "add", "--vendor", "2", "11"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add {
                vendor: 2,
                item: 11,
                quantity: 1,
                yes: false
            }
        })
    ));
}

#[test]
fn parses_cart_set_with_negative_quantity() {
    let cli = Cli::try_parse_from(["srmiggy", "cart", "set", "11", "-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Set {
                item: 11,
                quantity: -1
            }
        })
    ));
}

#[test]
fn checkout_defaults_to_cash_on_delivery() {
    let cli = Cli::try_parse_from(["srmiggy", "checkout", "--slot", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout {
            ref slot,
            payment: PaymentMethod::CashOnDelivery,
            use_points: false,
            yes: false,
            ..
        }) if slot == "5"
    ));
}

#[test]
fn checkout_parses_payment_and_overrides() {
    let cli = Cli::try_parse_from([
        "srmiggy",
        "checkout",
        "--slot",
        "5",
        "--payment",
        "wallet",
        "--address",
        "Library gate",
        "--use-points",
        "--yes",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout {
            payment: PaymentMethod::Wallet,
            address: Some(ref a),
            phone: None,
            use_points: true,
            yes: true,
            ..
        }) if a == "Library gate"
    ));
}

#[test]
fn checkout_accepts_uuid_slot_ids() {
    let cli = Cli::try_parse_from([
        "srmiggy",
        "checkout",
        "--slot",
        "3f2b8c1e-9d4a-4b7e-a1c2-5e6f7a8b9c0d",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Checkout { slot, .. }) => assert_eq!(
            SlotId::from(slot).as_str(),
            "3f2b8c1e-9d4a-4b7e-a1c2-5e6f7a8b9c0d"
        ),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn checkout_requires_a_slot() {
    assert!(Cli::try_parse_from(["srmiggy", "checkout"]).is_err());
}

#[test]
fn unknown_payment_method_is_rejected() {
    let result = Cli::try_parse_from(["srmiggy", "checkout", "--slot", "5", "--payment", "cheque"]);
    assert!(result.is_err());
}

#[test]
fn parses_orders_with_and_without_id() {
    let cli = Cli::try_parse_from(["srmiggy", "orders"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Orders { order_id: None })));

    let cli = Cli::try_parse_from(["srmiggy", "orders", "42"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Orders { order_id: Some(42) })
    ));
}

#[test]
fn parses_wallet_add_amount() {
    let cli = Cli::try_parse_from(["srmiggy", "wallet", "add", "99.50"]).unwrap();
    match cli.command {
        Some(Commands::Wallet {
            command: WalletCommands::Add { amount },
        }) => assert_eq!(amount, rust_decimal::Decimal::new(9950, 2)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_admin_set_status() {
    let cli =
        Cli::try_parse_from(["srmiggy", "admin", "set-status", "7", "out-for-delivery"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::SetStatus {
                order_id: 7,
                status: srmiggy_core::OrderStatus::OutForDelivery
            }
        })
    ));
}

#[test]
fn parses_theme_modes() {
    let cli = Cli::try_parse_from(["srmiggy", "theme"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Theme { mode: None })));

    let cli = Cli::try_parse_from(["srmiggy", "theme", "toggle"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Theme {
            mode: Some(ThemeMode::Toggle)
        })
    ));
}
