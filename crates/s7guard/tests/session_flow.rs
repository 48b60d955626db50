use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use s7guard::frame::{DataItem, Direction, VarType, OP_READ};
use s7guard::session::{SessionConfig, SessionError, SessionGuard};
use s7guard::transport::PlcStream;

/// Minimal read response: 14 header bytes, status, transport size,
/// bit length, data.
fn response_frame(status: u8, data: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; 14];
    frame.push(status);
    frame.push(0x04);
    frame.extend_from_slice(&((data.len() * 8) as u16).to_be_bytes());
    frame.extend_from_slice(data);
    frame
}

#[test]
fn read_round_trip_through_guard_and_loopback_controller() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let addr = listener.local_addr().expect("listener should have address");

    let controller = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("controller should accept");
        let mut request = [0u8; 4];
        socket
            .read_exact(&mut request)
            .expect("controller should read request");
        socket
            .write_all(&response_frame(0x00, &[0x12, 0x34]))
            .expect("controller should reply");
    });

    let mut guard = SessionGuard::with_config(SessionConfig {
        read_timeout: Some(Duration::from_secs(2)),
        ..SessionConfig::default()
    })
    .expect("config should be valid");
    let socket = TcpStream::connect(addr).expect("client should connect");
    guard
        .attach(PlcStream::from_tcp(socket))
        .expect("stream should attach");

    let items = [DataItem::new(VarType::Word, 1)];
    let request = [0x03, 0x00, 0x00, 0x1F];
    let budget = guard
        .admit_read(&items, &request, OP_READ)
        .expect("single word should fit");

    let stream = guard.stream_mut().expect("stream should be attached");
    stream.write_all(&request).expect("request should be written");
    let mut raw = vec![0u8; 20];
    stream.read_exact(&mut raw).expect("response should arrive");
    controller.join().expect("controller thread should complete");

    let data = guard
        .accept_response(Some(&raw.into()), 2, OP_READ)
        .expect("response should validate");

    assert_eq!(budget.response_size, 20);
    assert_eq!(&data[..], &[0x12, 0x34]);
    assert_eq!(guard.last_frame_hex_for(Direction::Sent), "0300001F");
    assert_eq!(
        guard.last_frame_hex_for(Direction::Received),
        "0000000000000000000000000000000400101234"
    );
    assert_eq!(guard.frames().len(), 2);
}

#[test]
fn detached_guard_reports_not_connected() {
    let mut guard = SessionGuard::new();
    assert!(matches!(guard.stream_mut(), Err(SessionError::NotConnected)));
}
