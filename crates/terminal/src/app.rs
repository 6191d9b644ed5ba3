use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Result;
use tokio::runtime::Runtime;

use termduel::{
    Connection, GameConfig, HostListener, Intent, MenuOption, SessionEnd, resolve_host, run_client,
    run_host,
};

use crate::keyboard::{self, KeyboardPump, LineEdit};
use crate::tui::Tui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    CreateRoom,
    JoinRoom(Option<String>),
    Exit,
}

pub struct App<'a> {
    tui: &'a mut Tui,
    runtime: &'a Runtime,
    config: GameConfig,
    port: u16,
    selected: MenuOption,
}

impl<'a> App<'a> {
    pub fn new(tui: &'a mut Tui, runtime: &'a Runtime, config: GameConfig, port: u16) -> Self {
        Self {
            tui,
            runtime,
            config,
            port,
            selected: MenuOption::CreateRoom,
        }
    }

    pub fn run(mut self, first: Screen) -> Result<()> {
        let mut screen = first;
        loop {
            screen = match screen {
                Screen::Menu => self.menu()?,
                Screen::CreateRoom => self.create_room()?,
                Screen::JoinRoom(address) => self.join_room(address)?,
                Screen::Exit => return Ok(()),
            };
        }
    }

    fn menu(&mut self) -> Result<Screen> {
        loop {
            self.tui.draw_menu(self.selected)?;
            let (selected, confirmed) = keyboard::read_menu(self.selected)?;
            self.selected = selected;
            if confirmed {
                return Ok(match selected {
                    MenuOption::CreateRoom => Screen::CreateRoom,
                    MenuOption::JoinRoom => Screen::JoinRoom(None),
                    MenuOption::Exit => Screen::Exit,
                });
            }
        }
    }

    fn create_room(&mut self) -> Result<Screen> {
        self.tui
            .draw_waiting("Create Room", &["Creating room...".to_string()])?;

        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
        let listener = match self.runtime.block_on(HostListener::bind(bind_addr)) {
            Ok(listener) => listener,
            Err(e) => return self.failure(&format!("Error: {}", e)),
        };

        self.tui.draw_waiting(
            "Room created",
            &[
                "Connection Info:".to_string(),
                format!("IP: {}", listener.advertised_ip()),
                format!("Port: {}", listener.port()),
                String::new(),
                "Waiting for player to connect... (Esc to cancel)".to_string(),
            ],
        )?;

        let (width, height) = self.tui.arena_size()?;
        let (pump, mut local) = KeyboardPump::spawn();
        let accepted = self.runtime.block_on(async {
            let accept = listener.accept();
            tokio::pin!(accept);
            loop {
                tokio::select! {
                    connection = &mut accept => break Some(connection),
                    intent = local.recv() => match intent {
                        Some(Intent::Quit) | None => break None,
                        Some(_) => continue,
                    },
                }
            }
        });

        let connection = match accepted {
            Some(Ok(connection)) => connection,
            Some(Err(e)) => {
                drop(local);
                pump.join();
                return self.failure(&format!("Connection Error: {}", e));
            }
            None => {
                drop(local);
                pump.join();
                log::info!("Room closed before anyone joined");
                return Ok(Screen::Menu);
            }
        };

        let end = self.runtime.block_on(run_host(
            connection,
            width,
            height,
            &self.config,
            local,
            &mut *self.tui,
        ));
        pump.join();
        self.after_session(end?)
    }

    fn join_room(&mut self, address: Option<String>) -> Result<Screen> {
        let address = match address {
            Some(address) => address,
            None => match self.prompt_address()? {
                Some(address) => address,
                None => return Ok(Screen::Menu),
            },
        };
        let target = resolve_host(&address, self.port);

        self.tui
            .draw_waiting("Join Room", &[format!("Connecting to {}...", target)])?;
        let connection = match self.runtime.block_on(Connection::connect(&target)) {
            Ok(connection) => connection,
            Err(e) => return self.failure(&format!("Error: {}", e)),
        };

        let (width, height) = self.tui.arena_size()?;
        let (pump, local) = KeyboardPump::spawn();
        let end = self.runtime.block_on(run_client(
            connection,
            width,
            height,
            &self.config,
            local,
            &mut *self.tui,
        ));
        pump.join();
        self.after_session(end?)
    }

    fn prompt_address(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.tui.draw_address_prompt(&input)?;
            let key = keyboard::read_address_key()?;
            match keyboard::edit_address(&mut input, key) {
                LineEdit::Pending => {}
                LineEdit::Submit => return Ok(Some(input)),
                LineEdit::Cancel => return Ok(None),
            }
        }
    }

    fn after_session(&mut self, end: SessionEnd) -> Result<Screen> {
        self.tui.draw_end(Some(&end.state), &end.reason.describe())?;
        self.restart_prompt()
    }

    fn failure(&mut self, message: &str) -> Result<Screen> {
        log::warn!("{}", message);
        self.tui.draw_end(None, message)?;
        self.restart_prompt()
    }

    fn restart_prompt(&mut self) -> Result<Screen> {
        Ok(if keyboard::wait_for_restart()? {
            Screen::Menu
        } else {
            Screen::Exit
        })
    }
}
