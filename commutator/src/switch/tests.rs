use super::*;
use crate::driver::mock::{MockSession, Sent};
use crate::error::{ErrorKind, ParseError};

const STATUS_UP: &str = "\
                                             Flow Link          Back   Mdix
Port     Type         Duplex  Speed Neg      ctrl State       Pressure Mode
-------- ------------ ------  ----- -------- ---- ----------- -------- -------
gi1/0/1  1G-Copper    Full    1000  Enabled  Off  Up          Disabled On
";

const STATUS_DOWN: &str = "\
Port     Type         Duplex  Speed Neg      ctrl State       Pressure Mode
-------- ------------ ------  ----- -------- ---- ----------- -------- -------
te1/0/1  10G-Fiber    --      --    --       --   Down        --       --
";

const ACCESS_CONFIG: &str = "\
interface gigabitethernet1/0/12
 switchport access vlan 107
 switchport access multicast-tv vlan 118
exit
";

const TRUNK_CONFIG: &str = "\
interface gigabitethernet1/0/24
 switchport mode trunk
 switchport trunk allowed vlan add 102,104
 switchport trunk native vlan 110
exit
";

const POE_TABLE: &str = "\
Port Status: Port is on - Valid PD resistance signature detected
Port Standby Power: Disabled
Current (mA): 120
Voltage (V): 54
";

fn switch(session: MockSession) -> Switch<MockSession> {
    Switch::new(
        session,
        SwitchInfo {
            host: "192.168.111.57".to_string(),
            brand: "Eltex".to_string(),
            model: Some("MES2324".to_string()),
        },
    )
}

#[tokio::test]
async fn test_show_commands() {
    let mut sw = switch(
        MockSession::new()
            .reply("sh int", "all interfaces")
            .reply("sh int gi 1/0/5", "one interface")
            .reply("sh ru", "full config")
            .reply("sh ru int po 1", "port-channel config"),
    );

    assert_eq!(sw.show_interfaces().await.unwrap(), "all interfaces");
    assert_eq!(sw.show_interface(5u32).await.unwrap(), "one interface");
    assert_eq!(sw.show_running_config().await.unwrap(), "full config");
    assert_eq!(
        sw.show_interface_config("po 1").await.unwrap(),
        "port-channel config"
    );
    assert_eq!(
        sw.show_interface(100u32).await.unwrap_err().kind(),
        ErrorKind::Address
    );
}

#[tokio::test]
async fn test_firmware_version() {
    let mut sw = switch(MockSession::new().reply("show version", "  Version: 4.0.13.3\n"));
    assert_eq!(sw.firmware_version().await.unwrap(), "4.0.13.3");

    let mut sw = switch(MockSession::new());
    let err = sw.firmware_version().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_link_state() {
    let mut sw = switch(
        MockSession::new()
            .reply("show int status gi 1/0/1", STATUS_UP)
            .reply("show int status te 1/0/1", STATUS_DOWN)
            .reply("show int status gi 1/0/12", "Port Type\n----\ngi1/0/12\n"),
    );

    assert_eq!(sw.link_state(1u32).await.unwrap(), LinkState::Up);
    assert_eq!(sw.link_state(1001u32).await.unwrap(), LinkState::Down);
    assert!(sw.link_state(Port::path("gi", 1, 0, 1)).await.unwrap().is_up());

    let err = sw.link_state(12u32).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_unaddressable_port_sends_nothing() {
    let mut sw = switch(MockSession::new());

    let err = sw.link_state(100u32).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Address);
    let err = sw.set_vlan(1000u32, &VlanConfig::None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Address);

    assert!(sw.session().sent.is_empty());
}

#[tokio::test]
async fn test_get_vlan_queries() {
    let mut sw = switch(
        MockSession::new()
            .reply("sh ru int gi 1/0/12", ACCESS_CONFIG)
            .reply("sh ru int gi 1/0/24", TRUNK_CONFIG),
    );

    let VlanInfo::Settings(settings) = sw.get_vlan(12u32, VlanQuery::Settings).await.unwrap()
    else {
        panic!("expected settings");
    };
    assert_eq!(settings.mode, Some(SwitchportMode::Access));
    assert_eq!(settings.access, Some(107));
    assert_eq!(settings.mtv, Some(118));

    assert_eq!(
        sw.get_vlan(24u32, VlanQuery::Mode).await.unwrap(),
        VlanInfo::Mode(Some(SwitchportMode::Trunk))
    );
    assert_eq!(
        sw.get_vlan(24u32, VlanQuery::Lines).await.unwrap(),
        VlanInfo::Lines(vec![
            "switchport mode trunk".to_string(),
            "switchport trunk allowed vlan add 102,104".to_string(),
            "switchport trunk native vlan 110".to_string(),
        ])
    );

    let settings = sw.vlan_settings(24u32).await.unwrap();
    assert_eq!(settings.allowed.as_deref(), Some("102,104"));
    assert_eq!(settings.native, Some(110));
}

#[tokio::test]
async fn test_set_vlan_access_to_trunk() {
    let mut sw = switch(MockSession::new().reply("sh ru int gi 1/0/12", ACCESS_CONFIG));
    let config = VlanConfig::trunk()
        .with_allowed("102,104,111-112")
        .with_native(110)
        .with_mtv(118);

    sw.set_vlan(12u32, &config).await.unwrap();

    assert_eq!(
        sw.session().executed(),
        vec![
            "sh ru int gi 1/0/12",
            "config",
            "interface gi 1/0/12",
            "no switchport access multicast-tv vlan",
            "no switchport access vlan",
            "no switchport mode",
            "switchport mode trunk",
            "switchport trunk allowed vlan add 102,104,111-112",
            "switchport trunk native vlan 110",
            "switchport trunk multicast-tv vlan 118",
            "ex",
            "ex",
        ]
    );
}

#[tokio::test]
async fn test_set_vlan_none_clears_port() {
    for config in [TRUNK_CONFIG, ACCESS_CONFIG, ""] {
        let mut sw = switch(MockSession::new().reply("sh ru int gi 1/0/24", config));
        sw.set_vlan(24u32, &VlanConfig::None).await.unwrap();

        let executed = sw.session().executed();
        let cleared = executed
            .iter()
            .position(|c| *c == "no switchport mode")
            .unwrap();
        assert!(
            !executed[cleared..]
                .iter()
                .any(|c| c.starts_with("switchport mode"))
        );
        assert_eq!(executed[executed.len() - 2..], ["ex", "ex"]);
    }
}

#[tokio::test]
async fn test_set_vlan_exits_after_rejected_command() {
    let mut sw = switch(
        MockSession::new()
            .reply("sh ru int gi 1/0/3", "")
            .reject("switchport access vlan 4095", "% Wrong number of parameters"),
    );

    let err = sw
        .set_vlan(3u32, &VlanConfig::access(4095))
        .await
        .unwrap_err();
    assert!(err.is_invalid_command());

    let executed = sw.session().executed();
    assert_eq!(executed[executed.len() - 3..], ["switchport access vlan 4095", "ex", "ex"]);
}

#[tokio::test]
async fn test_get_poe_recovers_rejected_output() {
    let mut sw = switch(MockSession::new().reject(
        "show power inline gi 1/0/7",
        &format!("show power inline gi 1/0/7\n{POE_TABLE}"),
    ));

    assert_eq!(
        sw.get_poe(7u32, PoeQuery::Status).await.unwrap(),
        PoeStatus::Enabled(true)
    );
    assert_eq!(
        sw.get_poe(7u32, PoeQuery::Current).await.unwrap(),
        PoeStatus::Current(120.0)
    );
    assert_eq!(
        sw.get_poe(7u32, PoeQuery::Voltage).await.unwrap(),
        PoeStatus::Voltage(54.0)
    );
    assert_eq!(
        sw.get_poe(7u32, PoeQuery::Verbose).await.unwrap(),
        PoeStatus::Verbose(POE_TABLE.to_string())
    );
    assert!(sw.poe_enabled(7u32).await.unwrap());
}

#[tokio::test]
async fn test_get_poe_outcomes() {
    let mut sw = switch(
        MockSession::new()
            .reply("show power inline gi 1/0/1", "Port Status: Port is on")
            .reply("show power inline gi 1/0/2", "Port Status: Port is off")
            .reply("show power inline gi 1/0/3", "Power limit: 30W")
            .lose_on("show power inline gi 1/0/4"),
    );

    assert_eq!(sw.poe_enabled(1u32).await.unwrap(), true);
    assert_eq!(sw.poe_enabled(2u32).await.unwrap(), false);

    let err = sw.poe_enabled(3u32).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::MarkerNotFound {
            marker: "Port Status"
        })
    ));

    let err = sw.get_poe(4u32, PoeQuery::Status).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_set_poe() {
    let mut sw = switch(MockSession::new());
    sw.set_poe(5u32, true).await.unwrap();
    sw.set_poe(1404u32, false).await.unwrap();

    assert_eq!(
        sw.session().executed(),
        vec![
            "config",
            "interface gi 1/0/5",
            "power inline auto",
            "ex",
            "ex",
            "config",
            "interface te 4/0/4",
            "power inline never",
            "ex",
            "ex",
        ]
    );
}

#[tokio::test]
async fn test_write_confirms() {
    let mut sw = switch(MockSession::new());
    sw.write().await.unwrap();

    assert_eq!(
        sw.session().sent,
        vec![
            Sent::Terminator(Some(WRITE_CONFIRM.to_string())),
            Sent::Execute("write".to_string()),
            Sent::Terminator(None),
            Sent::Execute("y".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_write_resets_terminator_on_failure() {
    let mut sw = switch(MockSession::new().lose_on("write"));
    tokio_test::assert_err!(sw.write().await);
    assert_eq!(sw.session().sent.last(), Some(&Sent::Terminator(None)));
}

#[tokio::test]
async fn test_reload_resets_terminator_on_failure() {
    let mut sw = switch(MockSession::new().lose_on("reload"));
    tokio_test::assert_err!(sw.execute_script("reload\nsh ver\n").await);

    assert_eq!(
        sw.session().sent,
        vec![
            Sent::Terminator(Some(RELOAD_CONFIRM.to_string())),
            Sent::Execute("reload".to_string()),
            Sent::Terminator(None),
        ]
    );
}

#[tokio::test]
async fn test_reload_survives_disconnect_error() {
    let mut sw = switch(MockSession::new().failing_close());
    let outcome = tokio_test::assert_ok!(sw.execute_script("reload\n").await);

    assert!(outcome.reloaded);
    assert_eq!(sw.session().sent.last(), Some(&Sent::Close));
    assert!(!sw.session().is_open());
}

#[tokio::test]
async fn test_execute_script() {
    let script = "\
conf
int gi0/2
no sw mo
ex

wr
reload
sh run int gi0/9
";
    let mut sw = switch(MockSession::new());
    let outcome = tokio_test::assert_ok!(sw.execute_script(script).await);

    assert_eq!(
        outcome,
        ScriptOutcome {
            executed: 6,
            reloaded: true
        }
    );
    assert_eq!(
        sw.session().sent,
        vec![
            Sent::Execute("conf".to_string()),
            Sent::Execute("int gi0/2".to_string()),
            Sent::Execute("no sw mo".to_string()),
            Sent::Execute("ex".to_string()),
            Sent::Terminator(Some(WRITE_CONFIRM.to_string())),
            Sent::Execute("wr".to_string()),
            Sent::Terminator(None),
            Sent::Execute("y".to_string()),
            Sent::Terminator(Some(RELOAD_CONFIRM.to_string())),
            Sent::Execute("reload".to_string()),
            Sent::Raw("y".to_string()),
            Sent::Close,
        ]
    );
    assert!(!sw.session().is_open());
}

#[tokio::test]
async fn test_execute_file() {
    let path = std::env::temp_dir().join(format!("commutator-script-{}.txt", std::process::id()));
    tokio::fs::write(&path, "sh ver\nsh clock\n").await.unwrap();

    let mut sw = switch(MockSession::new());
    let outcome = sw.execute_file(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(outcome.executed, 2);
    assert!(!outcome.reloaded);
    assert_eq!(sw.session().executed(), vec!["sh ver", "sh clock"]);

    let err = sw.execute_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::Script(_)));
}

#[tokio::test]
async fn test_execute_and_close() {
    let mut sw = switch(MockSession::new().reply(
        "show environment temperature status",
        "TEMPERATURE is OK",
    ));
    sw.set_echo(true);
    assert!(
        sw.execute("show environment temperature status")
            .await
            .unwrap()
            .contains("TEMPERATURE is OK")
    );

    sw.close().await;
    sw.close().await;
    assert_eq!(
        sw.session()
            .sent
            .iter()
            .filter(|s| **s == Sent::Close)
            .count(),
        1
    );
}

#[test]
fn test_display() {
    assert_eq!(
        switch(MockSession::new()).to_string(),
        "Eltex commutator, ip 192.168.111.57"
    );
}
