//! VOSS command output fixtures.

#[allow(dead_code)]
pub const GIGABIT_ETHERNET: &str = "\
==========================================================================================
                                     Port Interface
==========================================================================================
Port Name
PORT                             LINK  PORT           PHYSICAL          STATUS
NUM      INDEX DESCRIPTION       TRAP  LOCK     MTU   ADDRESS           ADMIN  OPERATE
------------------------------------------------------------------------------------------
1/1      192   10GbNone          true  false    1950  00:51:00:ca:e0:00 up     up
1/2      193   10GbNone          true  false    1950  00:51:00:ca:e0:01 up     down
==========================================================================================
                                     Port Config
==========================================================================================
1/1      192   full  10000  disable
==========================================================================================
                                     Port Fdb
==========================================================================================
VLAN  MAC                STATUS   INTERFACE   SMLT
10    00:11:22:33:44:55  learned  Port-1/1    false
10    00:11:22:33:44:66  learned  Port-1/1    false
20    00:AA:BB:CC:DD:EE  learned  Port-1/2    false
20    00:AA:BB:CC:DD:FF  learned  Port-3/9    false
==========================================================================================
                                     Brouter Port Ip
==========================================================================================
10    00:11:22:33:44:77  learned  Port-1/1    false
";

#[allow(dead_code)]
pub const LLDP_NEIGHBOR: &str = "\
==========================================================================================
                                     LLDP Neighbor
==========================================================================================
Port: 1/1       Index    : 1                     Time: 1 day(s), 02:01:30
                ChassisId: MAC Address           00:51:00:ca:f0:00
                PortId   : IfName                1/5
                SysName  : core-sw-1
                SysCap   : Br / Br
Port: 1/2       Index    : 2                     Time: 1 day(s), 02:01:30
                ChassisId: MAC Address           00:51:00:ca:f0:01
                PortId   : IfName                1/6
                SysName  : core-sw-2
";

#[allow(dead_code)]
pub const ISIS_ADJACENCIES: &str = "\
================================================================================
                               ISIS Adjacencies
================================================================================
INTERFACE       L STATE   UPTIME      PRI HOLDTIME SYSID          HOST-NAME
--------------------------------------------------------------------------------
Port1/1         1 UP      1d 06:09:59 127 25       b0ad.aa42.2084 core-sw-1
Port1/2         1 INIT    0d 00:00:12 127 25       b0ad.aa42.2085
--------------------------------------------------------------------------------
";

#[allow(dead_code)]
pub const ISIS_INTERFACE: &str = "\
================================================================================
                                  ISIS Interfaces
================================================================================
IFIDX            TYPE   LEVEL   OP-STATE  ADM-STATE   ADJ   UP-ADJ  SPBM-L1-METRIC
--------------------------------------------------------------------------------
Port1/1          pt-pt  Level 1  UP       UP          1     1       10
Port1/2          pt-pt  Level 1  DOWN     UP          0     0       10
Mlt2             pt-pt  Level 1  UP       UP          1     1       10
";

#[allow(dead_code)]
pub const IP_INTERFACE: &str = "\
================================================================================
                                IP Interface - GlobalRouter
================================================================================
INTERFACE        IP               NET              BCASTADDR  REASM    VLAN   BROUTER
                 ADDRESS          MASK             FORMAT     MAXSIZE  ID     PORT
--------------------------------------------------------------------------------
Clip1            10.0.0.1         255.255.255.255  ones       1500     --     false
Vlan10           10.10.0.1        255.255.255.0    ones       1500     10     false
";

#[allow(dead_code)]
pub const VLAN_BASIC: &str = "\
================================================================================
                                 Vlan Basic
================================================================================
VLAN                                     MSTP
ID    NAME             TYPE              INST_ID  PROTOCOLID   SUBNETADDR
--------------------------------------------------------------------------------
1     Default          byPort            0        none         N/A
10    users            byPort            0        none         N/A
";

/// Split fixture text into parser input
#[allow(dead_code)]
pub fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Assemble a tech file from `(command, output)` sections
#[allow(dead_code)]
pub fn tech_text(sections: &[(&str, &str)]) -> String {
    let mut out = String::from("# tech file generated for tests\n");
    for (n, (command, output)) in sections.iter().enumerate() {
        out.push_str(&format!("Command:[{}] [ {} ]\n", n + 1, command));
        out.push_str(output);
    }
    out
}
