//! # Helm Config Template
//!
//! The values document is a fixed template with seven substitution sites. Its
//! layout (indentation, key order and the comment lines in the `client` block)
//! is part of the output contract and must not change. It is rendered with a
//! single `format!` so substituted values are never re-scanned for placeholders.

/// Render the agent Helm config
///
/// The application name is lowercased and used as the prefix of the three
/// Kubernetes secret names, which must match the secrets created when the
/// cluster was provisioned. The join addresses are rendered once with
/// [`format_join_list`] and used for both `externalServers.hosts` and
/// `client.join`.
pub fn render_helm_config(
    name: &str,
    datacenter: &str,
    fqdn: &str,
    retry_join: &[String],
) -> String {
    let name = name.to_lowercase();
    let retry_join = format_join_list(retry_join);

    format!(
        "global:
  enabled: false
  name: consul
  datacenter: {datacenter}
  acls:
    manageSystemACLs: true
    bootstrapToken:
      secretName: {name}-bootstrap-token
      secretKey: token
  gossipEncryption:
    secretName: {name}-hcs
    secretKey: gossipEncryptionKey
  tls:
    enabled: true
    enableAutoEncrypt: true
    caCert:
      secretName: {name}-hcs
      secretKey: caCert
externalServers:
  enabled: true
  hosts: {retry_join}
  httpsPort: 443
  useSystemRoots: true
  k8sAuthMethodHost: https://{fqdn}:443
client:
  enabled: true
  # If you are using Kubenet in your AKS cluster (the default network),
  # uncomment the line below.
  # exposeGossipPorts: true
  join: {retry_join}
connectInject:
  enabled: true"
    )
}

/// Render join addresses as a single-quoted flow list, e.g. `['10.0.0.1', '10.0.0.2']`
///
/// Each address is escaped as a double-quoted string literal and every double
/// quote in the result is then swapped for a single quote, matching the HCS CLI
/// output. Single quotes inside an address are not escaped.
pub fn format_join_list(retry_join: &[String]) -> String {
    format!("{retry_join:?}").replace('"', "'")
}
