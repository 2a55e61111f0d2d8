//! Constantes del formato de entrada de CanTherm.
//!
//! Cambiar cualquiera de estos valores cambia los nombres de archivo o el
//! contenido de los artefactos generados (y por tanto sus fingerprints).

/// Extensión de los artefactos de especie y de estado de transición.
pub const ARTIFACT_EXT: &str = "py";
/// Extensión del descriptor de job (`<label>.canth.py`).
pub const DESCRIPTOR_EXT: &str = "canth.py";
/// Extensión de los logs de química cuántica referenciados.
pub const LOG_EXT: &str = "log";
/// Etiqueta del estado de transición dentro del descriptor.
pub const TS_LABEL: &str = "TS";
/// Modelo de corrección por efecto túnel.
pub const TUNNELING_MODEL: &str = "Eckart";
/// Número de isómeros ópticos declarado para toda especie.
pub const OPTICAL_ISOMERS: u32 = 1;
/// Cabecera común de todos los archivos de entrada.
pub const HEADER: [&str; 2] = ["#!/usr/bin/env python", "# -*- coding: utf-8 -*-"];
