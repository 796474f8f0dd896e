use std::fs::File;
use std::io::Read;
use std::os::fd::OwnedFd;

use hidport::etf::Decoder;
use hidport::framing::{self, FrameReader, Pump};
use hidport::proto::{event, DeviceEntry};

fn collect_all(reader: &mut FrameReader, fd: &OwnedFd) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        match reader.pump(fd).unwrap() {
            Pump::Frames(frames) => out.extend(frames),
            Pump::Eof => return out,
        }
    }
}

#[test]
fn test_every_event_shape_survives_the_wire() {
    let shapes = vec![
        event::input_report(&[1, 2, 3]),
        event::descriptor_reply(&[0x05, 0x01, 0x09, 0x06]),
        event::device_closed(),
        event::device_list(&[DeviceEntry {
            path: "/dev/hidraw0".into(),
            name: "USB Gaming Keyboard".into(),
        }]),
    ];

    let (rx, tx) = nix::unistd::pipe().unwrap();
    for body in &shapes {
        framing::send(&tx, body).unwrap();
    }
    drop(tx);

    let mut reader = FrameReader::new();
    assert_eq!(collect_all(&mut reader, &rx), shapes);
}

#[test]
fn test_length_prefix_counts_body_exactly() {
    let body = event::input_report(&[0x42; 10]);
    let (rx, tx) = nix::unistd::pipe().unwrap();
    framing::send(&tx, &body).unwrap();
    drop(tx);

    let mut raw = Vec::new();
    File::from(rx).read_to_end(&mut raw).unwrap();
    assert_eq!(u16::from_be_bytes([raw[0], raw[1]]) as usize, body.len());
    assert_eq!(&raw[2..], &body[..]);
}

#[test]
fn test_chunked_delivery_reassembles() {
    let bodies = vec![
        event::device_closed(),
        event::input_report(b"abc"),
        event::descriptor_reply(&[1]),
    ];
    let mut wire = Vec::new();
    for body in &bodies {
        wire.extend_from_slice(&(body.len() as u16).to_be_bytes());
        wire.extend_from_slice(body);
    }

    // Deliver in 3-byte slivers so every frame straddles a read.
    let mut reader = FrameReader::new();
    let mut collected = Vec::new();
    for chunk in wire.chunks(3) {
        collected.extend(reader.feed(chunk).unwrap());
    }
    assert_eq!(collected, bodies);
}

#[test]
fn test_max_size_report_frames_cleanly() {
    let report = vec![0x5A; 8192];
    let body = event::input_report(&report);
    let (rx, tx) = nix::unistd::pipe().unwrap();
    framing::send(&tx, &body).unwrap();
    drop(tx);

    let mut reader = FrameReader::new();
    assert_eq!(collect_all(&mut reader, &rx), vec![body]);
}

#[test]
fn test_event_payloads_decode_back() {
    let report = [7u8; 64];
    let body = event::input_report(&report);
    assert_eq!(body[0], b'i');

    let mut dec = Decoder::new(&body[1..]);
    dec.version().unwrap();
    assert_eq!(dec.binary().unwrap(), &report);
    assert_eq!(dec.remaining(), 0);
}
