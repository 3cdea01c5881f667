//! End-to-end driver tests against an in-process fake switch.
//!
//! A loopback TCP listener plays the part of a DES-3528: Telnet option
//! negotiation, the login dialog, the clipaging pager, and canned
//! `show` output. The driver runs its real Telnet transport against it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};

use dlink_driver::{ConfigSource, DriverBuilder, NetworkDriver, TransportKind};

const PROMPT: &str = "\r\nDES-3528:admin#";

const PAGER_BANNER: &str = "CTRL+C ESC q Quit SPACE n Next Page ENTER Next Entry a All";

const SHOW_SWITCH: &str = "\
Device Type        : DES-3528 Fast Ethernet Switch
MAC Address        : 00-22-B0-10-8A-00
IP Address         : 10.90.90.90 (Manual)
Boot PROM Version  : Build 1.00.B008
Firmware Version   : Build 2.60.017
Hardware Version   : A3
Serial Number      : P1UQ394000001
System Name        : lab-access-1
System Uptime      : 3 days, 4 hours, 21 minutes, 52 seconds";

const SHOW_ARPENTRY: &str = "\
Interface    IP Address       MAC Address        Type
-------------------------------------------------------------------
System       10.12.16.1       00-1F-9D-48-72-51  Dynamic
System       10.12.16.32     00-22-B0-10-8A-00  Local

Total Entries: 2";

const SHOW_FDB: &str = "\
VID  VLAN Name                        MAC Address        Port  Type     Status
---- -------------------------------- ------------------ ----- -------- --------
1    default                          00-0F-E2-21-35-20  9     Dynamic  Forward
1    default                          00-22-B0-10-8A-00  CPU   Self     Forward

Total Entries: 2";

const SHOW_CONFIG: &str = "\
#-------------------------------------
#       Configuration
#-------------------------------------
create vlan mgmt tag 20
config ipif System ipaddress 10.90.90.90/8";

const IAC: u8 = 255;
const WILL: u8 = 251;
const OPT_ECHO: u8 = 1;

async fn start_fake_switch(paging: bool) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let commands = Arc::new(Mutex::new(Vec::new()));
    let log = commands.clone();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        serve(stream, log, paging).await;
    });

    (addr, commands)
}

/// Read one command line, tolerating interleaved Telnet control bytes
/// (negotiation replies, IAC NOP probes) on the wire.
async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<String> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw).await.unwrap() == 0 {
        return None;
    }
    let printable: Vec<u8> = raw
        .into_iter()
        .filter(|b| b.is_ascii_graphic() || *b == b' ')
        .collect();
    Some(String::from_utf8(printable).unwrap())
}

fn crlf(text: &str) -> Vec<u8> {
    text.replace('\n', "\r\n").into_bytes()
}

async fn serve(stream: TcpStream, commands: Arc<Mutex<Vec<String>>>, paging: bool) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    // Negotiate server echo, then run the login dialog
    write_half.write_all(&[IAC, WILL, OPT_ECHO]).await.unwrap();
    write_half
        .write_all(&crlf("DES-3528 Fast Ethernet Switch Command Line Interface\n\nUserName:"))
        .await
        .unwrap();
    let username = read_command(&mut reader).await.unwrap();
    assert_eq!(username, "admin");

    write_half.write_all(b"PassWord:").await.unwrap();
    let password = read_command(&mut reader).await.unwrap();
    assert_eq!(password, "secret");

    write_half.write_all(PROMPT.as_bytes()).await.unwrap();

    let mut pager_armed = paging;
    while let Some(command) = read_command(&mut reader).await {
        commands.lock().unwrap().push(command.clone());

        let mut reply = crlf(&format!("{command}\n"));
        match command.as_str() {
            "show switch" if pager_armed => {
                // Park on the pager until the quit key arrives
                pager_armed = false;
                reply.extend_from_slice(&crlf("Device Type        : DES-3528 Fast Ethernet Switch\n"));
                reply.extend_from_slice(PAGER_BANNER.as_bytes());
                write_half.write_all(&reply).await.unwrap();

                let mut key = [0u8; 1];
                reader.read_exact(&mut key).await.unwrap();
                assert_eq!(&key, b"q");

                write_half.write_all(PROMPT.as_bytes()).await.unwrap();
                continue;
            }
            "show switch" => reply.extend_from_slice(&crlf(SHOW_SWITCH)),
            "show arpentry" => reply.extend_from_slice(&crlf(SHOW_ARPENTRY)),
            "show fdb" => reply.extend_from_slice(&crlf(SHOW_FDB)),
            "show config current_config" => reply.extend_from_slice(&crlf(SHOW_CONFIG)),
            "disable clipaging" | "enable clipaging" => {
                reply.extend_from_slice(b"Success.");
            }
            _ => {
                reply.extend_from_slice(&crlf("Available commands:\n..  ?  clear  config  show"));
            }
        }
        reply.extend_from_slice(PROMPT.as_bytes());
        write_half.write_all(&reply).await.unwrap();
    }
}

fn driver_for(addr: SocketAddr) -> dlink_driver::DlinkDriver {
    DriverBuilder::new(addr.ip().to_string())
        .port(addr.port())
        .username("admin")
        .password("secret")
        .transport(TransportKind::Telnet)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_full_session_with_pager() {
    let (addr, commands) = start_fake_switch(true).await;
    let mut driver = driver_for(addr);

    driver.open().await.unwrap();
    assert!(driver.is_alive().await);

    let facts = driver.get_facts().await.unwrap();
    assert_eq!(facts.vendor, "D-Link");
    assert_eq!(facts.model, "DES-3528 Fast Ethernet Switch");
    assert_eq!(facts.serial_number, "P1UQ394000001");
    assert_eq!(facts.hostname, "lab-access-1");
    assert_eq!(facts.uptime, Some(3 * 86400 + 4 * 3600 + 21 * 60 + 52));

    let arp = driver.get_arp_table().await.unwrap();
    assert_eq!(arp.len(), 2);
    assert_eq!(arp[0].mac, "00-1F-9D-48-72-51");
    assert_eq!(arp[0].ip.to_string(), "10.12.16.1");
    assert_eq!(arp[1].entry_type, "Local");

    let fdb = driver.get_mac_address_table().await.unwrap();
    assert_eq!(fdb.len(), 2);
    assert_eq!(fdb[0].port, "9");
    assert_eq!(fdb[1].entry_type, "Self");

    let config = driver.get_config(ConfigSource::Running).await.unwrap();
    assert!(config.running.contains("create vlan mgmt tag 20"));

    driver.close().await.unwrap();
    assert!(!driver.is_alive().await);

    let commands = commands.lock().unwrap();
    // Pager probe and disarm on open, restore on close
    assert_eq!(commands[0], "show switch");
    assert_eq!(commands[1], "disable clipaging");
    assert_eq!(commands.last().unwrap(), "enable clipaging");
}

#[tokio::test]
async fn test_session_without_pager() {
    let (addr, commands) = start_fake_switch(false).await;
    let mut driver = driver_for(addr);

    driver.open().await.unwrap();
    let facts = driver.get_facts().await.unwrap();
    assert_eq!(facts.os_version, "Build 2.60.017");
    driver.close().await.unwrap();

    let commands = commands.lock().unwrap();
    assert!(!commands.contains(&"disable clipaging".to_string()));
    assert!(!commands.contains(&"enable clipaging".to_string()));
}

#[tokio::test]
async fn test_cli_surfaces_device_errors() {
    let (addr, _) = start_fake_switch(false).await;
    let mut driver = driver_for(addr);

    driver.open().await.unwrap();
    let output = driver
        .cli(&["show switch", "show bogus"])
        .await
        .unwrap();

    assert!(output["show switch"].is_success());
    assert_eq!(
        output["show bogus"].failure_message.as_deref(),
        Some("Available commands:")
    );

    driver.close().await.unwrap();
}
